use super::bookmark_store::BookmarkStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

pub type FileStore = BookmarkStore<FsBackend>;

impl FileStore {
    /// Opens (lazily) the store kept in `root/bookmarks.json`.
    /// The file is created with the standard containers on the first write.
    pub fn new(root: PathBuf) -> Self {
        BookmarkStore::with_backend(FsBackend::new(root))
    }
}
