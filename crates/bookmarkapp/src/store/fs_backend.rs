use super::backend::StorageBackend;
use super::table::BookmarkTable;
use crate::error::{BookmarkError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const TABLE_FILE: &str = "bookmarks.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self) -> PathBuf {
        self.root.join(TABLE_FILE)
    }
}

/// Writes `content` next to `target` and renames it into place.
pub(crate) fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let dir = target
        .parent()
        .ok_or_else(|| BookmarkError::Api(format!("No parent directory for {:?}", target)))?;
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(BookmarkError::Io)?;
    }
    let tmp_file = dir.join(format!(".bookmarks-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp_file, content).map_err(BookmarkError::Io)?;
    fs::rename(&tmp_file, target).map_err(BookmarkError::Io)?;
    Ok(())
}

impl StorageBackend for FsBackend {
    fn load_table(&self) -> Result<Option<BookmarkTable>> {
        let path = self.table_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(BookmarkError::Io)?;
        let table: BookmarkTable =
            serde_json::from_str(&content).map_err(BookmarkError::Serialization)?;
        Ok(Some(table))
    }

    fn save_table(&self, table: &BookmarkTable) -> Result<()> {
        let content = serde_json::to_string_pretty(table).map_err(BookmarkError::Serialization)?;
        write_atomic(&self.table_path(), &content)
    }
}
