use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.1.0"
/// Format for dev builds: "v0.1.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "bookmarks",
    bin_name = "bookmarks",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Browse, search, reorganize and export your bookmarks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $BOOKMARKS_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Html,
    Json,
    Csv,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the folder tree
    #[command(alias = "ls", display_order = 1)]
    Tree {
        /// Show every folder expanded
        #[arg(long)]
        all: bool,
    },

    /// Show only entries matching a query, and the folders leading to them
    #[command(alias = "s", display_order = 2)]
    Search { query: String },

    /// Save a bookmark
    #[command(display_order = 10)]
    Add {
        title: String,
        url: String,
        /// Parent folder id (defaults to the Bookmarks bar)
        #[arg(long, short)]
        folder: Option<String>,
    },

    /// Create a folder
    #[command(display_order = 11)]
    Mkdir {
        title: String,
        /// Parent folder id (defaults to the Bookmarks bar)
        #[arg(long, short)]
        folder: Option<String>,
    },

    /// Move a node into another folder
    #[command(alias = "move", display_order = 12)]
    Mv { source: String, target: String },

    /// Rename a node (prompts when no title is given)
    #[command(display_order = 13)]
    Rename { id: String, title: Option<String> },

    /// Delete a node and everything below it
    #[command(alias = "delete", display_order = 14)]
    Rm {
        id: String,
        /// Skip the confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Open a bookmark in the default browser
    #[command(display_order = 15)]
    Open {
        id: String,
        /// Print the URL instead of opening it
        #[arg(long)]
        print: bool,
    },

    /// Mark a folder as expanded
    #[command(display_order = 20)]
    Expand { id: String },

    /// Mark a folder as collapsed
    #[command(display_order = 21)]
    Collapse { id: String },

    /// Export the collection or one folder
    #[command(display_order = 30)]
    Export {
        /// Folder to export (defaults to everything)
        #[arg(long, short)]
        folder: Option<String>,

        #[arg(long, value_enum, default_value_t = FormatArg::Html)]
        format: FormatArg,

        /// Directory to write `bookmarks.<ext>` into; prints to stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Folder and bookmark counts
    #[command(display_order = 31)]
    Stats {
        /// Count below this folder only
        id: Option<String>,
    },

    /// Show, set or toggle the color theme
    #[command(display_order = 40)]
    Theme {
        #[arg(value_enum)]
        theme: Option<ThemeArg>,

        /// Switch to the other theme
        #[arg(long, conflicts_with = "theme")]
        toggle: bool,
    },
}
