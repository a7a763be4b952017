use super::backend::StorageBackend;
use super::table::BookmarkTable;
use crate::error::{BookmarkError, Result};
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the engine is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    table: RefCell<Option<BookmarkTable>>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful table writes so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageBackend for MemBackend {
    fn load_table(&self) -> Result<Option<BookmarkTable>> {
        Ok(self.table.borrow().clone())
    }

    fn save_table(&self, table: &BookmarkTable) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(BookmarkError::MutationFailure(
                "Simulated write error".to_string(),
            ));
        }
        *self.table.borrow_mut() = Some(table.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
