use super::table::BookmarkTable;
use crate::error::Result;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while BookmarkStore handles the "what" (structural rules live in the table).
pub trait StorageBackend {
    /// Load the persisted table.
    /// Returns Ok(None) when nothing has been written yet.
    fn load_table(&self) -> Result<Option<BookmarkTable>>;

    /// Persist the table.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_table(&self, table: &BookmarkTable) -> Result<()>;
}
