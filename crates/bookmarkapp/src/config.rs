//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading from
//! environment variables, a TOML file and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `BOOKMARKS_ROOT_ID`, `BOOKMARKS_DEBOUNCE_MS`, etc.
//! 2. **Config file**: `bookmarks.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `root_id` | `"0"` | Collection root container |
//! | `protected_ids` | `["0", "1", "2"]` | Containers that are never moved, renamed or deleted |
//! | `default_parent_id` | `"1"` | Folder selected when a session starts |
//! | `search_debounce_ms` | `300` | Quiet period before a search query is applied |
//! | `indent_spaces` | `2` | Indentation per level in HTML export |
//!
//! ## Data Directory
//!
//! The data directory is, in order: an explicit path, `BOOKMARKS_HOME`, or the
//! platform data directory from [`directories`].

use crate::error::{BookmarkError, Result};
use crate::model::NodeId;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "bookmarks.toml";
pub const HOME_ENV: &str = "BOOKMARKS_HOME";

/// Engine configuration, stored in `bookmarks.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookmarksConfig {
    /// Identifier of the collection root container.
    #[config(default = "0", env = "BOOKMARKS_ROOT_ID")]
    pub root_id: String,

    /// Protection roots: never a reparent source or target, never renamed or deleted.
    #[config(default = ["0", "1", "2"])]
    pub protected_ids: Vec<String>,

    /// Folder that new bookmarks and folders go into until another is selected.
    #[config(default = "1", env = "BOOKMARKS_DEFAULT_PARENT")]
    pub default_parent_id: String,

    /// Search debounce quiet period, in milliseconds.
    #[config(default = 300, env = "BOOKMARKS_DEBOUNCE_MS")]
    pub search_debounce_ms: u64,

    /// Spaces per nesting level in HTML export.
    #[config(default = 2)]
    pub indent_spaces: usize,
}

impl Default for BookmarksConfig {
    fn default() -> Self {
        Self {
            root_id: "0".to_string(),
            protected_ids: vec!["0".to_string(), "1".to_string(), "2".to_string()],
            default_parent_id: "1".to_string(),
            search_debounce_ms: 300,
            indent_spaces: 2,
        }
    }
}

impl BookmarksConfig {
    /// Loads env overrides, then `bookmarks.toml` from `data_dir`, then defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        BookmarksConfig::builder()
            .env()
            .file(data_dir.join(CONFIG_FILE))
            .load()
            .map_err(|e| BookmarkError::Config(e.to_string()))
    }

    pub fn root_id(&self) -> NodeId {
        NodeId::from(self.root_id.as_str())
    }

    pub fn default_parent_id(&self) -> NodeId {
        NodeId::from(self.default_parent_id.as_str())
    }

    pub fn is_protected(&self, id: &NodeId) -> bool {
        self.protected_ids.iter().any(|p| id == p.as_str())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Picks the data directory: explicit path, `BOOKMARKS_HOME`, or the platform default.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "bookmarks")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BookmarkError::Config("Could not determine a data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BookmarksConfig::default();
        assert_eq!(config.root_id(), NodeId::from("0"));
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.indent_spaces, 2);
    }

    #[test]
    fn test_protection_roots() {
        let config = BookmarksConfig::default();
        assert!(config.is_protected(&"0".into()));
        assert!(config.is_protected(&"2".into()));
        assert!(!config.is_protected(&"3".into()));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "search_debounce_ms = 50\nprotected_ids = [\"0\"]\n",
        )
        .unwrap();

        let config = BookmarksConfig::load(dir.path()).unwrap();
        assert_eq!(config.search_debounce_ms, 50);
        assert_eq!(config.protected_ids, vec!["0".to_string()]);
        assert_eq!(config.default_parent_id, "1");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BookmarksConfig::load(dir.path()).unwrap();
        assert_eq!(config.protected_ids, BookmarksConfig::default().protected_ids);
        assert_eq!(config.indent_spaces, 2);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/explicit"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/explicit"));
    }
}
