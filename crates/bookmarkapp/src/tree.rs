//! # Tree Builder
//!
//! Turns backing-store responses into the annotated in-memory tree that every
//! other component reads.
//!
//! ## Build Procedure
//!
//! 1. List the children of the collection root. If this call fails the whole
//!    build fails with [`BookmarkError::FetchFailure`]: a caller must show an
//!    error state rather than half a tree.
//! 2. Skip first-level entries that carry a URL (bookmarks are never shown as
//!    first-level entries).
//! 3. Fetch each remaining container's full subtree, one call per container,
//!    and annotate it. A failure here is logged and only that container is
//!    skipped.
//!
//! Trees are always rebuilt wholesale, never patched.

use crate::error::{BookmarkError, Result};
use crate::model::{is_bookmark_url, Node, NodeId, StoreNode};
use crate::store::DataStore;
use tracing::{debug, error};

/// The first-level containers of a collection, fully annotated.
#[derive(Debug, Clone, Default)]
pub struct BookmarkTree {
    pub roots: Vec<Node>,
}

impl BookmarkTree {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order walk over every node of every root.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        self.roots.iter().flat_map(Node::walk)
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    pub fn first_level_ids(&self) -> Vec<NodeId> {
        self.roots
            .iter()
            .filter(|n| n.is_folder())
            .map(|n| n.id.clone())
            .collect()
    }

    /// Ancestor folders of `id`, nearest first. Empty for first-level nodes
    /// and for ids not in the tree.
    pub fn ancestors_of(&self, id: &str) -> Vec<&Node> {
        fn descend<'a>(node: &'a Node, id: &str, path: &mut Vec<&'a Node>) -> bool {
            if node.id == id {
                return true;
            }
            path.push(node);
            if node.children.iter().any(|c| descend(c, id, path)) {
                return true;
            }
            path.pop();
            false
        }

        for root in &self.roots {
            let mut path = Vec::new();
            if descend(root, id, &mut path) {
                path.reverse();
                return path;
            }
        }
        Vec::new()
    }
}

/// Annotates a store subtree, giving `node` the supplied depth and each
/// descendant its parent's depth + 1.
pub fn annotate(node: StoreNode, depth: u32) -> Node {
    let url = node.url.filter(|u| is_bookmark_url(Some(u.as_str())));
    let children = match (&url, node.children) {
        (None, Some(children)) => children
            .into_iter()
            .map(|child| annotate(child, depth + 1))
            .collect(),
        _ => Vec::new(),
    };
    Node {
        id: node.id,
        parent_id: node.parent_id,
        index: node.index,
        title: node.title,
        url,
        date_added: node.date_added,
        depth,
        children,
    }
}

/// Builds the tree under `root_id`.
pub fn build<S: DataStore>(store: &S, root_id: &NodeId) -> Result<BookmarkTree> {
    let top_level = store
        .list_children(root_id)
        .map_err(BookmarkError::into_fetch)?;

    let mut roots = Vec::new();
    for item in top_level {
        if item.is_bookmark() {
            debug!(id = %item.id, "skipping first-level bookmark");
            continue;
        }
        match store.get_subtree(&item.id) {
            Ok(subtree) => roots.push(annotate(subtree, 1)),
            Err(e) => error!(id = %item.id, error = %e, "failed to load folder subtree"),
        }
    }

    debug!(containers = roots.len(), "tree rebuilt");
    Ok(BookmarkTree::new(roots))
}
