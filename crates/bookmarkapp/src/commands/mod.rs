//! # Command Layer
//!
//! This module contains the **core business logic** for structural edits and
//! exports. Each command lives in its own submodule and implements plain Rust
//! functions over a [`crate::store::DataStore`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Rebuild the tree**: the API facade decides that from [`CmdResult::changed`].
//! - **Prompt or confirm**: answers arrive as arguments; the dispatcher asks.
//! - **Any terminal or file I/O**: exports return text, not files.
//!
//! ## No-ops vs. Errors
//!
//! Disallowed operations (reparenting a protection root, renaming with an empty
//! title, a declined delete) are not errors. They return `Ok` with
//! [`CmdResult::skipped`] set and never touch the store. Only store rejections
//! and fetch problems are `Err`.
//!
//! ## Command Modules
//!
//! - [`reparent`]: drag-and-drop moves
//! - [`rename`]: retitle a node
//! - [`delete`]: remove a node and its subtree
//! - [`open`]: resolve a bookmark's URL
//! - [`create`]: new folders and bookmarks
//! - [`export`]: HTML / JSON / CSV serialization
//! - [`stats`]: folder and bookmark counts

use crate::model::{NodeId, StoreNode};
use serde::Serialize;
use std::fmt;

pub mod create;
pub mod delete;
pub mod export;
pub mod open;
pub mod rename;
pub mod reparent;
pub mod stats;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Why a command did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Source and target of a move are the same node.
    SameNode,
    /// The node is one of the protection roots.
    Protected(NodeId),
    /// A prompt was dismissed or answered with nothing.
    Cancelled,
    /// A confirmation was declined.
    Declined,
    /// The action only applies to bookmarks.
    NotABookmark(NodeId),
}

impl SkipReason {
    /// Validation no-ops, as opposed to the user backing out.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SkipReason::SameNode | SkipReason::Protected(_) | SkipReason::NotABookmark(_)
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SameNode => write!(f, "source and target are the same"),
            SkipReason::Protected(id) => write!(f, "{} is a protected root folder", id),
            SkipReason::Cancelled => write!(f, "cancelled"),
            SkipReason::Declined => write!(f, "not confirmed"),
            SkipReason::NotABookmark(id) => write!(f, "{} is a folder, not a bookmark", id),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Nodes as the store returned them after the change.
    pub affected: Vec<StoreNode>,
    pub messages: Vec<CmdMessage>,
    pub skipped: Option<SkipReason>,
    /// Set by `open`: the URL to show in a new view.
    pub url: Option<String>,
    /// True when the store was mutated and the tree must be rebuilt.
    pub changed: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Default::default()
        }
    }

    pub fn changed(affected: Vec<StoreNode>) -> Self {
        Self {
            affected,
            changed: true,
            ..Default::default()
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
