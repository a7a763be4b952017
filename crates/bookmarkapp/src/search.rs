//! # Search and Filtering
//!
//! Computes which nodes stay visible for a query.
//!
//! ## Rules
//!
//! - Matching is a case-insensitive substring test against
//!   [`Node::display_title`], evaluated for each node on its own: a folder
//!   matches by its own title, never by its descendants' titles.
//! - Visibility propagates upward. If anything below a folder is visible, the
//!   folder is visible too and is recorded in [`Visibility::expanded`] so a live
//!   view can open it.
//! - An empty query shows everything and opens nothing.
//!
//! Filtering is idempotent: filtering [`Visibility::apply`]'s output again with
//! the same query yields the same visible set.
//!
//! ## Debouncing
//!
//! [`SearchDebouncer`] coalesces keystrokes. It holds at most one pending query;
//! scheduling a new one cancels the previous. The caller drives it with
//! explicit [`Instant`]s, so it needs no timer thread and is deterministic in
//! tests.

use crate::model::{Node, NodeId};
use crate::tree::BookmarkTree;
use std::collections::HashSet;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    /// Every node that stays on screen.
    pub visible: HashSet<NodeId>,
    /// Folders shown only because something below them is visible.
    pub expanded: HashSet<NodeId>,
}

impl Visibility {
    pub fn is_visible(&self, id: &NodeId) -> bool {
        self.visible.contains(id)
    }

    pub fn is_force_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// The tree restricted to visible nodes.
    pub fn apply(&self, tree: &BookmarkTree) -> BookmarkTree {
        fn prune(node: &Node, vis: &Visibility) -> Option<Node> {
            if !vis.is_visible(&node.id) {
                return None;
            }
            let mut kept = node.clone();
            kept.children = node
                .children
                .iter()
                .filter_map(|c| prune(c, vis))
                .collect();
            Some(kept)
        }

        BookmarkTree::new(tree.roots.iter().filter_map(|r| prune(r, self)).collect())
    }
}

pub fn matches(node: &Node, needle_lower: &str) -> bool {
    needle_lower.is_empty() || node.display_title().to_lowercase().contains(needle_lower)
}

/// Visibility of every node in `tree` for `query`.
pub fn filter(tree: &BookmarkTree, query: &str) -> Visibility {
    let needle = query.to_lowercase();
    let mut vis = Visibility::default();

    if needle.is_empty() {
        vis.visible = tree.walk().map(|n| n.id.clone()).collect();
        return vis;
    }

    // Returns whether `node` ended up visible.
    fn visit(node: &Node, needle: &str, vis: &mut Visibility) -> bool {
        let mut descendant_visible = false;
        for child in &node.children {
            descendant_visible |= visit(child, needle, vis);
        }
        if descendant_visible {
            vis.expanded.insert(node.id.clone());
        }
        let visible = descendant_visible || matches(node, needle);
        if visible {
            vis.visible.insert(node.id.clone());
        }
        visible
    }

    for root in &tree.roots {
        visit(root, &needle, &mut vis);
    }
    vis
}

#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    due: Instant,
}

/// Single-slot debouncer for search input.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<PendingQuery>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending query; the new one fires `delay` after `now`.
    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(PendingQuery {
            query: query.into(),
            due: now + self.delay,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending query fires, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }

    /// Takes the pending query once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self.pending.as_ref().is_some_and(|p| now >= p.due);
        if ready {
            self.pending.take().map(|p| p.query)
        } else {
            None
        }
    }
}
