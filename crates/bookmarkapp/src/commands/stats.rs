use crate::error::{BookmarkError, Result};
use crate::model::{Node, NodeId};
use crate::store::DataStore;
use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;
use tracing::error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FolderStats {
    pub folders: usize,
    pub bookmarks: usize,
}

impl AddAssign for FolderStats {
    fn add_assign(&mut self, rhs: Self) {
        self.folders += rhs.folders;
        self.bookmarks += rhs.bookmarks;
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

impl fmt::Display for FolderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            plural(self.folders, "folder"),
            plural(self.bookmarks, "bookmark")
        )
    }
}

/// Counts every folder and bookmark below `node`, not `node` itself.
pub fn count(node: &Node) -> FolderStats {
    let mut stats = FolderStats::default();
    for child in &node.children {
        if child.is_bookmark() {
            stats.bookmarks += 1;
        } else {
            stats.folders += 1;
            stats += count(child);
        }
    }
    stats
}

/// Counts the whole collection below `root` by listing children level by
/// level.
pub fn collection_stats<S: DataStore>(store: &S, root: &NodeId) -> Result<FolderStats> {
    let mut stats = FolderStats::default();
    let mut pending = vec![root.clone()];

    while let Some(id) = pending.pop() {
        let children = store.list_children(&id).map_err(|e| {
            error!(%id, error = %e, "failed to count bookmarks");
            BookmarkError::into_fetch(e)
        })?;
        for child in children {
            if child.is_bookmark() {
                stats.bookmarks += 1;
            } else {
                stats.folders += 1;
                pending.push(child.id);
            }
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::tree;

    #[test]
    fn display_pluralizes() {
        let one = FolderStats {
            folders: 1,
            bookmarks: 1,
        };
        assert_eq!(one.to_string(), "1 folder - 1 bookmark");
        let many = FolderStats {
            folders: 3,
            bookmarks: 0,
        };
        assert_eq!(many.to_string(), "3 folders - 0 bookmarks");
    }

    #[test]
    fn count_is_recursive_and_excludes_self() {
        let a = Node::folder(
            "a",
            "A",
            vec![
                Node::bookmark("x", "x", "http://x"),
                Node::folder("b", "B", vec![Node::bookmark("y", "y", "http://y")]),
            ],
        );
        assert_eq!(
            count(&a),
            FolderStats {
                folders: 1,
                bookmarks: 2
            }
        );
    }

    #[test]
    fn collection_stats_agree_with_tree_counts() {
        let fixture = StoreFixture::scenario().with_bookmark("2", "z", "http://z");
        let stats = collection_stats(&fixture.store, &"0".into()).unwrap();
        // Bookmarks bar, Other bookmarks, A, B.
        assert_eq!(
            stats,
            FolderStats {
                folders: 4,
                bookmarks: 3
            }
        );

        let tree = tree::build(&fixture.store, &"0".into()).unwrap();
        let mut from_tree = FolderStats::default();
        for root in &tree.roots {
            from_tree.folders += 1;
            from_tree += count(root);
        }
        assert_eq!(from_tree, stats);
    }

    #[test]
    fn missing_root_is_a_fetch_failure() {
        let fixture = StoreFixture::new();
        let err = collection_stats(&fixture.store, &"nope".into()).unwrap_err();
        assert!(matches!(err, BookmarkError::FetchFailure(_)));
    }
}
