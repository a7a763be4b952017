//! # Command Handlers
//!
//! `run()` parses the arguments, sets up logging, opens the data directory and
//! hands each subcommand to a small handler. Handlers call into
//! [`BookmarksApi`] and print what comes back; they hold no business logic.
//!
//! Rejected changes (a cycle, an unknown id) come back as errors and end the
//! process with a non-zero exit code. No-ops such as touching a protected
//! folder are reported as warnings and exit cleanly.

use super::render::{self, TreeView};
use super::setup::{Cli, Commands, FormatArg, ThemeArg};
use super::styles::{palette, Palette};
use anyhow::{anyhow, Context, Result};
use bookmarkapp::api::BookmarksApi;
use bookmarkapp::commands::export::ExportFormat;
use bookmarkapp::commands::CmdResult;
use bookmarkapp::config::{resolve_data_dir, BookmarksConfig};
use bookmarkapp::dispatch::{ActionOutcome, ContextAction, Interaction};
use bookmarkapp::model::NodeId;
use bookmarkapp::prefs::{FilePrefs, Theme};
use bookmarkapp::store::fs::FileStore;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Api = BookmarksApi<FileStore, FilePrefs>;

const LOG_ENV: &str = "BOOKMARKS_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    debug!(data_dir = %data_dir.display(), "opening bookmarks");
    let config = BookmarksConfig::load(&data_dir)?;
    let mut api = BookmarksApi::new(
        FileStore::new(data_dir.clone()),
        FilePrefs::new(data_dir),
        config,
    )?;
    api.load()?;

    let palette = palette(api.theme().unwrap_or_default());
    let mut ui = TerminalInteraction;

    match cli.command {
        None => handle_tree(&api, false, palette),
        Some(Commands::Tree { all }) => handle_tree(&api, all, palette),
        Some(Commands::Search { query }) => handle_search(&mut api, &query, palette),
        Some(Commands::Add { title, url, folder }) => {
            select_parent(&mut api, folder);
            report(&api.save_bookmark(&title, &url)?, palette);
            Ok(())
        }
        Some(Commands::Mkdir { title, folder }) => {
            select_parent(&mut api, folder);
            report(&api.create_folder(&title)?, palette);
            Ok(())
        }
        Some(Commands::Mv { source, target }) => {
            report(&api.reparent(&source.into(), &target.into())?, palette);
            Ok(())
        }
        Some(Commands::Rename { id, title }) => {
            let id = NodeId::from(id);
            match title {
                Some(title) => report(&api.rename(&id, Some(title.as_str()))?, palette),
                None => context_action(&mut api, &id, ContextAction::Rename, &mut ui, palette)?,
            }
            Ok(())
        }
        Some(Commands::Rm { id, yes }) => {
            let id = NodeId::from(id);
            if yes {
                report(&api.delete(&id, true)?, palette);
            } else {
                context_action(&mut api, &id, ContextAction::Delete, &mut ui, palette)?;
            }
            Ok(())
        }
        Some(Commands::Open { id, print }) => {
            let id = NodeId::from(id);
            if print {
                let res = api.open_url(&id)?;
                match &res.url {
                    Some(url) => println!("{}", url),
                    None => report(&res, palette),
                }
            } else {
                context_action(&mut api, &id, ContextAction::Open, &mut ui, palette)?;
            }
            Ok(())
        }
        Some(Commands::Expand { id }) => {
            api.set_expanded(&id.into(), true)?;
            Ok(())
        }
        Some(Commands::Collapse { id }) => {
            api.set_expanded(&id.into(), false)?;
            Ok(())
        }
        Some(Commands::Export {
            folder,
            format,
            output,
        }) => {
            let target = folder.map(NodeId::from);
            let file = api.export(target.as_ref(), export_format(format))?;
            match output {
                Some(dir) => {
                    std::fs::create_dir_all(&dir)
                        .with_context(|| format!("Could not create {}", dir.display()))?;
                    let path = dir.join(&file.filename);
                    std::fs::write(&path, &file.content)
                        .with_context(|| format!("Could not write {}", path.display()))?;
                    println!("{}", palette.success.apply_to(format!("Exported to {}", path.display())));
                }
                None => print!("{}", file.content),
            }
            Ok(())
        }
        Some(Commands::Stats { id }) => {
            let stats = match id {
                Some(id) => api
                    .folder_stats(&NodeId::from(id.as_str()))
                    .ok_or_else(|| anyhow!("Bookmark not found: {}", id))?,
                None => api.collection_stats()?,
            };
            println!("{}", stats);
            Ok(())
        }
        Some(Commands::Theme { theme, toggle }) => {
            let current = if toggle {
                api.toggle_theme()?
            } else if let Some(theme) = theme {
                let theme = match theme {
                    ThemeArg::Light => Theme::Light,
                    ThemeArg::Dark => Theme::Dark,
                };
                api.set_theme(theme)?;
                theme
            } else {
                api.theme()?
            };
            println!("{}", theme_name(current));
            Ok(())
        }
    }
}

/// Logs go to stderr. `BOOKMARKS_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn select_parent(api: &mut Api, folder: Option<String>) {
    let parent = folder
        .map(NodeId::from)
        .unwrap_or_else(|| api.config().default_parent_id());
    api.select_folder(&parent);
}

fn handle_tree(api: &Api, all: bool, palette: &Palette) -> Result<()> {
    let expanded = |id: &NodeId| all || api.is_expanded(id);
    let view = TreeView {
        is_expanded: &expanded,
        visibility: None,
        query: "",
    };
    print!("{}", render::render_tree(api.tree(), &view, palette));
    Ok(())
}

fn handle_search(api: &mut Api, query: &str, palette: &Palette) -> Result<()> {
    api.set_query(query);
    let expanded = |id: &NodeId| api.is_expanded(id);
    let view = TreeView {
        is_expanded: &expanded,
        visibility: Some(api.visibility()),
        query: api.query(),
    };
    print!("{}", render::render_tree(api.tree(), &view, palette));
    Ok(())
}

fn context_action(
    api: &mut Api,
    id: &NodeId,
    action: ContextAction,
    ui: &mut TerminalInteraction,
    palette: &Palette,
) -> Result<()> {
    api.open_context_menu(id);
    if let ActionOutcome::Command(res) = api.run_action(action, ui)? {
        report(&res, palette);
    }
    Ok(())
}

fn report(res: &CmdResult, palette: &Palette) {
    print!("{}", render::render_messages(&res.messages, palette));
    if let Some(reason) = &res.skipped {
        print!("{}", render::render_skip(reason, palette));
    }
}

fn export_format(format: FormatArg) -> ExportFormat {
    match format {
        FormatArg::Html => ExportFormat::Html,
        FormatArg::Json => ExportFormat::Json,
        FormatArg::Csv => ExportFormat::Csv,
    }
}

fn theme_name(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

/// Prompts and confirmations on stdin, URLs through the system opener.
struct TerminalInteraction;

impl TerminalInteraction {
    fn read_answer(question: &str) -> Option<String> {
        print!("{} ", question);
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Interaction for TerminalInteraction {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let question = if default.is_empty() {
            message.to_string()
        } else {
            format!("{} [{}]", message, default)
        };
        Self::read_answer(&question)
    }

    fn confirm(&mut self, message: &str) -> bool {
        Self::read_answer(&format!("{} [y/N]", message))
            .is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes"))
    }

    fn open_url(&mut self, url: &str) -> bookmarkapp::error::Result<()> {
        open::that(url).map_err(bookmarkapp::error::BookmarkError::from)
    }
}
