//! # Expansion State
//!
//! Remembers which folders are open. The map is stored under
//! [`EXPANDED_FOLDERS_KEY`] as `{ "<folder id>": true|false }` and every change
//! is persisted immediately.
//!
//! ## Defaults
//!
//! - A folder without an entry is collapsed.
//! - First run: when the persisted map is empty after the first successful
//!   tree build, every first-level folder is marked expanded and the whole map
//!   is written once (see [`ExpansionState::seed_first_run`]).

use crate::error::Result;
use crate::model::NodeId;
use crate::prefs::{PrefsStore, EXPANDED_FOLDERS_KEY};
use crate::tree::BookmarkTree;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    folders: BTreeMap<NodeId, bool>,
}

impl ExpansionState {
    pub fn load<P: PrefsStore>(prefs: &P) -> Result<Self> {
        let folders = match prefs.get(&[EXPANDED_FOLDERS_KEY])?.remove(EXPANDED_FOLDERS_KEY) {
            Some(Value::Null) | None => BTreeMap::new(),
            Some(value) => serde_json::from_value(value)?,
        };
        Ok(Self { folders })
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.folders.get(id).copied().unwrap_or(false)
    }

    pub fn expanded_ids(&self) -> Vec<NodeId> {
        self.folders
            .iter()
            .filter(|(_, open)| **open)
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn persist<P: PrefsStore>(prefs: &mut P, folders: &BTreeMap<NodeId, bool>) -> Result<()> {
        let mut entries = Map::new();
        entries.insert(
            EXPANDED_FOLDERS_KEY.to_string(),
            serde_json::to_value(folders)?,
        );
        prefs.set(entries)
    }

    /// Records and persists one folder's state. Memory is only updated once
    /// the write succeeded.
    pub fn set_expanded<P: PrefsStore>(
        &mut self,
        prefs: &mut P,
        id: &NodeId,
        expanded: bool,
    ) -> Result<()> {
        let mut next = self.folders.clone();
        next.insert(id.clone(), expanded);
        Self::persist(prefs, &next)?;
        self.folders = next;
        Ok(())
    }

    /// Flips a folder and returns its new state.
    pub fn toggle<P: PrefsStore>(&mut self, prefs: &mut P, id: &NodeId) -> Result<bool> {
        let expanded = !self.is_expanded(id);
        self.set_expanded(prefs, id, expanded)?;
        Ok(expanded)
    }

    /// Expands every first-level folder when nothing has been stored yet,
    /// persisting the result in one write. Returns whether seeding happened.
    pub fn seed_first_run<P: PrefsStore>(
        &mut self,
        prefs: &mut P,
        tree: &BookmarkTree,
    ) -> Result<bool> {
        if !self.folders.is_empty() {
            return Ok(false);
        }
        let next: BTreeMap<NodeId, bool> = tree
            .first_level_ids()
            .into_iter()
            .map(|id| (id, true))
            .collect();
        Self::persist(prefs, &next)?;
        debug!(folders = next.len(), "seeded first-run expansion state");
        self.folders = next;
        Ok(true)
    }
}
