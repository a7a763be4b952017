use super::backend::StorageBackend;
use super::table::BookmarkTable;
use super::{CreateDetails, DataStore, MoveDestination, UpdateChanges};
use crate::error::Result;
use crate::model::{NodeId, StoreNode};
use tracing::debug;

pub struct BookmarkStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> BookmarkStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load(&self) -> Result<BookmarkTable> {
        Ok(self.backend.load_table()?.unwrap_or_else(BookmarkTable::seeded))
    }

    /// Loads the table, applies one mutation and persists the result.
    /// Nothing is saved when the mutation fails.
    fn mutate<T>(&self, op: impl FnOnce(&mut BookmarkTable) -> Result<T>) -> Result<T> {
        let mut table = self.load()?;
        let out = op(&mut table)?;
        self.backend.save_table(&table)?;
        Ok(out)
    }
}

impl<B: StorageBackend> DataStore for BookmarkStore<B> {
    fn list_children(&self, id: &NodeId) -> Result<Vec<StoreNode>> {
        self.load()?.list_children(id)
    }

    fn get_subtree(&self, id: &NodeId) -> Result<StoreNode> {
        self.load()?.get_subtree(id)
    }

    fn get(&self, id: &NodeId) -> Result<StoreNode> {
        self.load()?.get(id)
    }

    fn create(&mut self, details: CreateDetails) -> Result<StoreNode> {
        debug!(parent = %details.parent_id, title = %details.title, "create");
        self.mutate(|table| table.create(details))
    }

    fn update(&mut self, id: &NodeId, changes: UpdateChanges) -> Result<StoreNode> {
        debug!(%id, "update");
        self.mutate(|table| table.update(id, changes))
    }

    fn move_node(&mut self, id: &NodeId, destination: MoveDestination) -> Result<StoreNode> {
        debug!(%id, parent = %destination.parent_id, "move");
        self.mutate(|table| table.move_node(id, destination))
    }

    fn remove_subtree(&mut self, id: &NodeId) -> Result<()> {
        debug!(%id, "remove subtree");
        self.mutate(|table| table.remove_subtree(id))
    }
}
