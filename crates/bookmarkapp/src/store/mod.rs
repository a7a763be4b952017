//! # Storage Layer
//!
//! This module defines the backing-store abstraction. The [`DataStore`] trait is
//! the contract the engine consumes: listing, subtree retrieval, create, update,
//! move and subtree removal, each a single synchronous request/response.
//!
//! ## Layering
//!
//! - [`table::BookmarkTable`]: the flat record table and every structural rule
//!   (cycle checks, permanent containers, child ordering).
//! - [`backend::StorageBackend`]: raw load/save of the table (memory or disk).
//! - [`bookmark_store::BookmarkStore`]: glues the two and implements
//!   [`DataStore`]. Every call loads the table, applies one operation and saves
//!   it back, so the backend is always the source of truth.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: `bookmarks.json` in a data directory.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── bookmarks.json      # Record table
//! ├── state.json          # UI preferences (see crate::prefs)
//! └── bookmarks.toml      # Optional configuration
//! ```

use crate::error::Result;
use crate::model::{NodeId, StoreNode};

pub mod backend;
pub mod bookmark_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDetails {
    pub parent_id: NodeId,
    pub title: String,
    /// `None` (or empty) creates a folder.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateChanges {
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDestination {
    pub parent_id: NodeId,
    /// Position among the new siblings; appended when absent.
    pub index: Option<usize>,
}

/// Abstract interface for the bookmark backing store.
///
/// Unknown ids surface as [`crate::error::BookmarkError::NotFound`], rejected
/// mutations as [`crate::error::BookmarkError::MutationFailure`].
pub trait DataStore {
    /// Direct children of a container, without grandchildren.
    fn list_children(&self, id: &NodeId) -> Result<Vec<StoreNode>>;

    /// Full nested tree rooted at `id`.
    fn get_subtree(&self, id: &NodeId) -> Result<StoreNode>;

    /// A single node, without children.
    fn get(&self, id: &NodeId) -> Result<StoreNode>;

    fn create(&mut self, details: CreateDetails) -> Result<StoreNode>;

    fn update(&mut self, id: &NodeId, changes: UpdateChanges) -> Result<StoreNode>;

    /// Reparent a node. Fails if the move would create a cycle.
    fn move_node(&mut self, id: &NodeId, destination: MoveDestination) -> Result<StoreNode>;

    /// Remove a node and its entire subtree.
    fn remove_subtree(&mut self, id: &NodeId) -> Result<()>;
}
