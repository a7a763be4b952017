use super::bookmark_store::BookmarkStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = BookmarkStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        BookmarkStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::Result;
    use crate::model::{NodeId, StoreNode};
    use crate::store::{CreateDetails, DataStore, MoveDestination, UpdateChanges};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Builds store contents by title, so tests can refer to nodes by name.
    pub struct StoreFixture {
        pub store: InMemoryStore,
        ids: HashMap<String, NodeId>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                ids: HashMap::new(),
            }
        }

        /// Resolves a title added through this fixture, or treats `name` as a raw id.
        pub fn id(&self, name: &str) -> NodeId {
            self.ids
                .get(name)
                .cloned()
                .unwrap_or_else(|| NodeId::from(name))
        }

        fn add(mut self, parent: &str, title: &str, url: Option<&str>) -> Self {
            let parent_id = self.id(parent);
            let node = self
                .store
                .create(CreateDetails {
                    parent_id,
                    title: title.to_string(),
                    url: url.map(str::to_string),
                })
                .unwrap();
            self.ids.insert(title.to_string(), node.id);
            self
        }

        /// Splits the fixture into its store and a name lookup.
        pub fn into_parts(self) -> (InMemoryStore, Names) {
            (self.store, Names(self.ids))
        }

        pub fn with_folder(self, parent: &str, title: &str) -> Self {
            self.add(parent, title, None)
        }

        pub fn with_bookmark(self, parent: &str, title: &str, url: &str) -> Self {
            self.add(parent, title, Some(url))
        }

        /// `Bookmarks bar/A [x, B [y]]`
        pub fn scenario() -> Self {
            Self::new()
                .with_folder("1", "A")
                .with_bookmark("A", "x", "http://x")
                .with_folder("A", "B")
                .with_bookmark("B", "y", "http://y")
        }
    }

    /// Title to id lookup that outlives the fixture.
    #[derive(Debug, Clone, Default)]
    pub struct Names(HashMap<String, NodeId>);

    impl Names {
        pub fn id(&self, name: &str) -> NodeId {
            self.0.get(name).cloned().unwrap_or_else(|| NodeId::from(name))
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum StoreCall {
        ListChildren(NodeId),
        GetSubtree(NodeId),
        Get(NodeId),
        Create(NodeId),
        Update(NodeId),
        Move(NodeId, NodeId),
        RemoveSubtree(NodeId),
    }

    /// Wraps a store and records every call made against it.
    pub struct CountingStore<S: DataStore> {
        pub inner: S,
        calls: RefCell<Vec<StoreCall>>,
    }

    impl<S: DataStore> CountingStore<S> {
        pub fn new(inner: S) -> Self {
            Self {
                inner,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<StoreCall> {
            self.calls.borrow().clone()
        }

        pub fn clear(&self) {
            self.calls.borrow_mut().clear();
        }

        pub fn move_calls(&self) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| matches!(c, StoreCall::Move(..)))
                .count()
        }

        pub fn mutation_calls(&self) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| {
                    matches!(
                        c,
                        StoreCall::Create(_)
                            | StoreCall::Update(_)
                            | StoreCall::Move(..)
                            | StoreCall::RemoveSubtree(_)
                    )
                })
                .count()
        }

        fn record(&self, call: StoreCall) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl<S: DataStore> DataStore for CountingStore<S> {
        fn list_children(&self, id: &NodeId) -> Result<Vec<StoreNode>> {
            self.record(StoreCall::ListChildren(id.clone()));
            self.inner.list_children(id)
        }

        fn get_subtree(&self, id: &NodeId) -> Result<StoreNode> {
            self.record(StoreCall::GetSubtree(id.clone()));
            self.inner.get_subtree(id)
        }

        fn get(&self, id: &NodeId) -> Result<StoreNode> {
            self.record(StoreCall::Get(id.clone()));
            self.inner.get(id)
        }

        fn create(&mut self, details: CreateDetails) -> Result<StoreNode> {
            self.record(StoreCall::Create(details.parent_id.clone()));
            self.inner.create(details)
        }

        fn update(&mut self, id: &NodeId, changes: UpdateChanges) -> Result<StoreNode> {
            self.record(StoreCall::Update(id.clone()));
            self.inner.update(id, changes)
        }

        fn move_node(&mut self, id: &NodeId, destination: MoveDestination) -> Result<StoreNode> {
            self.record(StoreCall::Move(id.clone(), destination.parent_id.clone()));
            self.inner.move_node(id, destination)
        }

        fn remove_subtree(&mut self, id: &NodeId) -> Result<()> {
            self.record(StoreCall::RemoveSubtree(id.clone()));
            self.inner.remove_subtree(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{CountingStore, StoreCall, StoreFixture};
    use super::*;
    use crate::error::BookmarkError;
    use crate::model::NodeId;
    use crate::store::{CreateDetails, DataStore, MoveDestination};

    #[test]
    fn test_remove_not_found() {
        let mut store = InMemoryStore::new();
        let id = NodeId::from("404");
        match store.remove_subtree(&id) {
            Err(BookmarkError::NotFound(err_id)) => assert_eq!(err_id, id),
            _ => panic!("Expected NotFound"),
        }
    }

    #[test]
    fn test_failed_mutation_is_not_persisted() {
        let mut store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);
        let res = store.create(CreateDetails {
            parent_id: "1".into(),
            title: "lost".into(),
            url: None,
        });
        assert!(matches!(res, Err(BookmarkError::MutationFailure(_))));

        store.backend().set_simulate_write_error(false);
        assert!(store.list_children(&"1".into()).unwrap().is_empty());
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn test_scenario_fixture() {
        let fixture = StoreFixture::scenario();
        let a = fixture.store.get_subtree(&fixture.id("A")).unwrap();
        let children = a.children.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].url.as_deref(), Some("http://x"));
        assert_eq!(children[1].title, "B");
        assert_eq!(children[1].children.as_ref().unwrap()[0].title, "y");
    }

    #[test]
    fn test_counting_store_records_calls() {
        let fixture = StoreFixture::scenario();
        let (a, b) = (fixture.id("A"), fixture.id("B"));
        let mut store = CountingStore::new(fixture.store);

        store.list_children(&"0".into()).unwrap();
        store
            .move_node(
                &b,
                MoveDestination {
                    parent_id: "2".into(),
                    index: None,
                },
            )
            .unwrap();
        assert!(store
            .move_node(
                &a,
                MoveDestination {
                    parent_id: a.clone(),
                    index: None
                }
            )
            .is_err());

        assert_eq!(store.move_calls(), 2);
        assert_eq!(store.calls()[0], StoreCall::ListChildren("0".into()));
        store.clear();
        assert!(store.calls().is_empty());
    }
}
