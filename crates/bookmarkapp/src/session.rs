//! Per-session interaction state: bulk selection, the folder new items go
//! into, and the target of an open context menu. None of this is persisted.

use crate::model::NodeId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    bulk_mode: bool,
    selection: BTreeSet<NodeId>,
    selected_folder: NodeId,
    context_target: Option<NodeId>,
}

impl SessionState {
    pub fn new(default_folder: NodeId) -> Self {
        Self {
            bulk_mode: false,
            selection: BTreeSet::new(),
            selected_folder: default_folder,
            context_target: None,
        }
    }

    pub fn bulk_mode(&self) -> bool {
        self.bulk_mode
    }

    /// Flips bulk mode. The selection is cleared either way.
    pub fn toggle_bulk_mode(&mut self) -> bool {
        self.bulk_mode = !self.bulk_mode;
        self.selection.clear();
        self.bulk_mode
    }

    pub fn selection(&self) -> &BTreeSet<NodeId> {
        &self.selection
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selection.contains(id)
    }

    /// Adds or removes `id`; returns whether it is selected afterwards.
    pub fn toggle_selected(&mut self, id: &NodeId) -> bool {
        if self.selection.remove(id) {
            false
        } else {
            self.selection.insert(id.clone());
            true
        }
    }

    pub fn selected_folder(&self) -> &NodeId {
        &self.selected_folder
    }

    pub fn select_folder(&mut self, id: NodeId) {
        self.selected_folder = id;
    }

    pub fn open_context_menu(&mut self, id: NodeId) {
        self.context_target = Some(id);
    }

    pub fn context_target(&self) -> Option<&NodeId> {
        self.context_target.as_ref()
    }

    /// Closes the menu, handing back the captured target.
    pub fn close_context_menu(&mut self) -> Option<NodeId> {
        self.context_target.take()
    }
}
