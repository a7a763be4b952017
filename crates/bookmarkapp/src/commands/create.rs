use crate::commands::{CmdMessage, CmdResult, SkipReason};
use crate::error::{BookmarkError, Result};
use crate::model::NodeId;
use crate::store::{CreateDetails, DataStore};

/// Creates a folder under `parent`. An empty title is treated as a cancelled
/// prompt.
pub fn create_folder<S: DataStore>(store: &mut S, parent: &NodeId, title: &str) -> Result<CmdResult> {
    if title.is_empty() {
        return Ok(CmdResult::skipped(SkipReason::Cancelled));
    }

    let node = store
        .create(CreateDetails {
            parent_id: parent.clone(),
            title: title.to_string(),
            url: None,
        })
        .map_err(BookmarkError::into_mutation)?;

    let message = format!("Created folder '{}' ({})", node.title, node.id);
    Ok(CmdResult::changed(vec![node]).with_message(CmdMessage::success(message)))
}

/// Saves a bookmark under `parent`.
pub fn save_bookmark<S: DataStore>(
    store: &mut S,
    parent: &NodeId,
    title: &str,
    url: &str,
) -> Result<CmdResult> {
    if url.is_empty() {
        return Err(BookmarkError::MutationFailure(
            "A bookmark needs a non-empty URL".to_string(),
        ));
    }

    let node = store
        .create(CreateDetails {
            parent_id: parent.clone(),
            title: title.to_string(),
            url: Some(url.to_string()),
        })
        .map_err(BookmarkError::into_mutation)?;

    let message = format!("Saved bookmark '{}' ({})", node.title, node.id);
    Ok(CmdResult::changed(vec![node]).with_message(CmdMessage::success(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{CountingStore, StoreFixture};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn folder_is_appended_to_parent() {
        let fixture = StoreFixture::scenario();
        let a = fixture.id("A");
        let mut store = fixture.store;

        let res = create_folder(&mut store, &a, "C").unwrap();
        assert!(res.changed);
        let children = store.list_children(&a).unwrap();
        assert_eq!(children.last().map(|n| n.title.as_str()), Some("C"));
        assert!(!children.last().unwrap().is_bookmark());
    }

    #[test]
    fn empty_folder_title_is_cancelled() {
        let mut store = CountingStore::new(InMemoryStore::new());
        let res = create_folder(&mut store, &"1".into(), "").unwrap();
        assert_eq!(res.skipped, Some(SkipReason::Cancelled));
        assert_eq!(store.mutation_calls(), 0);
    }

    #[test]
    fn bookmark_is_saved_with_url() {
        let mut store = InMemoryStore::new();
        let res = save_bookmark(&mut store, &"2".into(), "Rust", "https://rust-lang.org").unwrap();
        let node = &res.affected[0];
        assert!(node.is_bookmark());
        assert_eq!(node.parent_id, Some(NodeId::from("2")));
    }

    #[test]
    fn bookmark_into_bookmark_is_rejected() {
        let fixture = StoreFixture::scenario();
        let x = fixture.id("x");
        let mut store = fixture.store;
        let err = save_bookmark(&mut store, &x, "nested", "http://n").unwrap_err();
        assert!(matches!(err, BookmarkError::MutationFailure(_)));
    }
}
