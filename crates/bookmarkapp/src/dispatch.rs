//! # Action Dispatch
//!
//! Context-menu actions and the user-facing side effects they need.
//!
//! Anything that has to ask the user something or leave the library (a text
//! prompt, a yes/no confirmation, opening a URL in a new view) goes through
//! the [`Interaction`] trait. The CLI implements it against the terminal; tests
//! use [`fixtures::ScriptedInteraction`].
//!
//! Every action runs against a target id captured when the menu was opened,
//! never against whatever happens to be selected when the action fires.

use crate::commands::{self, CmdResult};
use crate::config::BookmarksConfig;
use crate::error::{BookmarkError, Result};
use crate::model::NodeId;
use crate::store::DataStore;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const RENAME_PROMPT: &str = "Enter new name:";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this?";
pub const FOLDER_PROMPT: &str = "Enter folder name:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    Open,
    Rename,
    Delete,
    Export,
}

impl fmt::Display for ContextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextAction::Open => "open",
            ContextAction::Rename => "rename",
            ContextAction::Delete => "delete",
            ContextAction::Export => "export",
        };
        f.write_str(name)
    }
}

impl FromStr for ContextAction {
    type Err = BookmarkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(ContextAction::Open),
            "rename" => Ok(ContextAction::Rename),
            "delete" => Ok(ContextAction::Delete),
            "export" => Ok(ContextAction::Export),
            other => Err(BookmarkError::Api(format!("Unknown action '{}'", other))),
        }
    }
}

/// The user-facing side of an action.
pub trait Interaction {
    /// Asks for a line of text. `None` when the user dismissed the prompt.
    fn prompt(&mut self, message: &str, initial: &str) -> Option<String>;

    fn confirm(&mut self, message: &str) -> bool;

    /// Shows `url` in a new view (browser tab, system browser, ...).
    fn open_url(&mut self, url: &str) -> Result<()>;
}

#[derive(Debug)]
pub enum ActionOutcome {
    /// A command ran (or was skipped); see its result.
    Command(CmdResult),
    /// The export chooser should open, scoped to `target`.
    ChooseExport { target: NodeId },
    /// Bulk mode: `id` was added to or removed from the selection.
    Selection { id: NodeId, selected: bool },
    /// A folder click: it is now the selected folder and was toggled.
    FolderToggled { id: NodeId, expanded: bool },
}

impl ActionOutcome {
    pub fn command(&self) -> Option<&CmdResult> {
        match self {
            ActionOutcome::Command(res) => Some(res),
            _ => None,
        }
    }

    /// True when the store was mutated and the tree needs a rebuild.
    pub fn changed(&self) -> bool {
        self.command().is_some_and(|res| res.changed)
    }
}

/// Runs a context-menu action against `target`.
pub fn run_context_action<S: DataStore, I: Interaction>(
    store: &mut S,
    config: &BookmarksConfig,
    target: &NodeId,
    action: ContextAction,
    ui: &mut I,
) -> Result<ActionOutcome> {
    debug!(%target, %action, "context action");
    let res = match action {
        ContextAction::Open => {
            let res = commands::open::run(store, target)?;
            if let Some(url) = &res.url {
                ui.open_url(url)?;
            }
            res
        }
        ContextAction::Rename => {
            // Protection roots are rejected before anyone gets prompted.
            if config.is_protected(target) {
                commands::rename::run(store, config, target, None)?
            } else {
                let answer = ui.prompt(RENAME_PROMPT, "");
                commands::rename::run(store, config, target, answer.as_deref())?
            }
        }
        ContextAction::Delete => {
            let confirmed = !config.is_protected(target) && ui.confirm(DELETE_CONFIRM);
            commands::delete::run(store, config, target, confirmed)?
        }
        ContextAction::Export => {
            return Ok(ActionOutcome::ChooseExport {
                target: target.clone(),
            })
        }
    };
    Ok(ActionOutcome::Command(res))
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records what it was asked.
    #[derive(Debug, Default)]
    pub struct ScriptedInteraction {
        pub answers: VecDeque<Option<String>>,
        pub confirmations: VecDeque<bool>,
        pub prompts: Vec<String>,
        pub opened: Vec<String>,
    }

    impl ScriptedInteraction {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn answer(mut self, answer: Option<&str>) -> Self {
            self.answers.push_back(answer.map(str::to_string));
            self
        }

        pub fn confirming(mut self, yes: bool) -> Self {
            self.confirmations.push_back(yes);
            self
        }
    }

    impl Interaction for ScriptedInteraction {
        fn prompt(&mut self, message: &str, _initial: &str) -> Option<String> {
            self.prompts.push(message.to_string());
            self.answers.pop_front().flatten()
        }

        fn confirm(&mut self, message: &str) -> bool {
            self.prompts.push(message.to_string());
            self.confirmations.pop_front().unwrap_or(false)
        }

        fn open_url(&mut self, url: &str) -> Result<()> {
            self.opened.push(url.to_string());
            Ok(())
        }
    }
}
