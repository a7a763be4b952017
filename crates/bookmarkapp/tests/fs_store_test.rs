use bookmarkapp::model::NodeId;
use bookmarkapp::prefs::{self, FilePrefs, PrefsStore, Theme, EXPANDED_FOLDERS_KEY, PREFS_FILE};
use bookmarkapp::store::backend::StorageBackend;
use bookmarkapp::store::fs::FileStore;
use bookmarkapp::store::fs_backend::{FsBackend, TABLE_FILE};
use bookmarkapp::store::table::BookmarkTable;
use bookmarkapp::store::{CreateDetails, DataStore, MoveDestination};
use serde_json::{json, Map};
use std::fs;
use tempfile::TempDir;

fn create(store: &mut FileStore, parent: &str, title: &str, url: Option<&str>) -> NodeId {
    store
        .create(CreateDetails {
            parent_id: parent.into(),
            title: title.to_string(),
            url: url.map(str::to_string),
        })
        .unwrap()
        .id
}

#[test]
fn test_table_roundtrip_through_backend() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    assert!(backend.load_table().unwrap().is_none());

    backend.save_table(&BookmarkTable::seeded()).unwrap();
    let loaded = backend.load_table().unwrap().unwrap();
    assert_eq!(loaded.next_id, 3);
    assert_eq!(loaded.records.len(), 3);
}

#[test]
fn test_atomic_write_leaves_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    create(&mut store, "1", "Docs", None);
    create(&mut store, "1", "Rust", Some("https://rust-lang.org"));

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![TABLE_FILE.to_string()]);
}

#[test]
fn test_moves_persist_across_instances() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    let folder = create(&mut store, "1", "A", None);
    let link = create(&mut store, "2", "x", Some("http://x"));

    store
        .move_node(
            &link,
            MoveDestination {
                parent_id: folder.clone(),
                index: Some(0),
            },
        )
        .unwrap();

    let reopened = FileStore::new(dir.path().to_path_buf());
    let children = reopened.list_children(&folder).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, link);
    assert_eq!(children[0].index, Some(0));
    assert!(reopened.list_children(&"2".into()).unwrap().is_empty());
}

#[test]
fn test_corrupt_table_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(TABLE_FILE), "{ not json").unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    assert!(store.list_children(&"0".into()).is_err());
}

#[test]
fn test_file_prefs_merge_and_persist() {
    let dir = TempDir::new().unwrap();
    let mut prefs = FilePrefs::new(dir.path().to_path_buf());

    prefs::set_theme(&mut prefs, Theme::Dark).unwrap();
    let mut entries = Map::new();
    entries.insert(EXPANDED_FOLDERS_KEY.to_string(), json!({"1": true}));
    prefs.set(entries).unwrap();

    let reopened = FilePrefs::new(dir.path().to_path_buf());
    assert_eq!(prefs::theme(&reopened).unwrap(), Theme::Dark);
    let values = reopened.get(&[EXPANDED_FOLDERS_KEY]).unwrap();
    assert_eq!(values[EXPANDED_FOLDERS_KEY], json!({"1": true}));

    let raw = fs::read_to_string(dir.path().join(PREFS_FILE)).unwrap();
    assert!(raw.contains("\"theme\": \"dark\""));
}

#[test]
fn test_missing_prefs_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let prefs = FilePrefs::new(dir.path().join("nested"));
    assert!(prefs.get(&["theme"]).unwrap().is_empty());
    assert_eq!(prefs::scroll_position(&prefs).unwrap(), None);
}
