//! # UI Preferences
//!
//! A small key-value persistence service for UI state that outlives a session:
//! theme, expanded folders, scroll position and popup height. Values are plain
//! JSON so the stored file stays readable and forward compatible.
//!
//! [`PrefsStore`] mirrors a browser-style local storage: `get` a set of keys,
//! `set` a mapping in one write. Typed accessors for the individual keys live
//! at the bottom of this module; expanded folders are owned by
//! [`crate::expansion`].

use crate::error::{BookmarkError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

pub const THEME_KEY: &str = "theme";
pub const EXPANDED_FOLDERS_KEY: &str = "expandedFolders";
pub const SCROLL_POSITION_KEY: &str = "scrollPosition";
pub const POPUP_HEIGHT_KEY: &str = "popupHeight";

pub const PREFS_FILE: &str = "state.json";

pub trait PrefsStore {
    /// Values for the requested keys; missing keys are simply absent.
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// Merge `entries` into the stored values in a single write.
    fn set(&mut self, entries: Map<String, Value>) -> Result<()>;
}

/// In-memory preferences for tests and headless use.
#[derive(Default)]
pub struct MemPrefs {
    values: Map<String, Value>,
    writes: Cell<usize>,
    simulate_write_error: bool,
}

impl MemPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Number of `set` calls that reached storage.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl PrefsStore for MemPrefs {
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        Ok(pick(&self.values, keys))
    }

    fn set(&mut self, entries: Map<String, Value>) -> Result<()> {
        if self.simulate_write_error {
            return Err(BookmarkError::Api("Simulated write error".to_string()));
        }
        self.values.extend(entries);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Preferences persisted as a JSON object in `state.json`.
pub struct FilePrefs {
    path: PathBuf,
}

impl FilePrefs {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(PREFS_FILE),
        }
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path).map_err(BookmarkError::Io)?;
        serde_json::from_str(&content).map_err(BookmarkError::Serialization)
    }
}

impl PrefsStore for FilePrefs {
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        Ok(pick(&self.load()?, keys))
    }

    fn set(&mut self, entries: Map<String, Value>) -> Result<()> {
        let mut values = self.load()?;
        values.extend(entries);
        let content = serde_json::to_string_pretty(&values).map_err(BookmarkError::Serialization)?;
        crate::store::fs_backend::write_atomic(&self.path, &content)
    }
}

fn pick(values: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|k| values.get(*k).map(|v| (k.to_string(), v.clone())))
        .collect()
}

fn read_key<P: PrefsStore, T: serde::de::DeserializeOwned>(prefs: &P, key: &str) -> Result<Option<T>> {
    match prefs.get(&[key])?.remove(key) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

fn write_key<P: PrefsStore, T: Serialize>(prefs: &mut P, key: &str, value: T) -> Result<()> {
    let mut entries = Map::new();
    entries.insert(key.to_string(), serde_json::to_value(value)?);
    prefs.set(entries)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub fn theme<P: PrefsStore>(prefs: &P) -> Result<Theme> {
    Ok(read_key(prefs, THEME_KEY)?.unwrap_or_default())
}

pub fn set_theme<P: PrefsStore>(prefs: &mut P, theme: Theme) -> Result<()> {
    write_key(prefs, THEME_KEY, theme)
}

/// Flips the persisted theme and returns the new one.
pub fn toggle_theme<P: PrefsStore>(prefs: &mut P) -> Result<Theme> {
    let next = theme(prefs)?.toggled();
    set_theme(prefs, next)?;
    Ok(next)
}

pub fn scroll_position<P: PrefsStore>(prefs: &P) -> Result<Option<u32>> {
    read_key(prefs, SCROLL_POSITION_KEY)
}

pub fn set_scroll_position<P: PrefsStore>(prefs: &mut P, position: u32) -> Result<()> {
    write_key(prefs, SCROLL_POSITION_KEY, position)
}

pub fn popup_height<P: PrefsStore>(prefs: &P) -> Result<Option<u32>> {
    read_key(prefs, POPUP_HEIGHT_KEY)
}

pub fn set_popup_height<P: PrefsStore>(prefs: &mut P, height: u32) -> Result<()> {
    write_key(prefs, POPUP_HEIGHT_KEY, height)
}
