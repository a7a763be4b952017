//! # Domain Model: Folders, Bookmarks and the Kind Rule
//!
//! This module defines the core data structures: [`NodeId`], [`StoreNode`] (the
//! raw shape the backing store speaks) and [`Node`] (the annotated in-memory
//! tree entry built by [`crate::tree`]).
//!
//! ## The Kind Rule
//!
//! There is no stored "is folder" flag anywhere. A node is a
//! [`NodeKind::Bookmark`] iff it carries a non-empty URL, otherwise it is a
//! [`NodeKind::Folder`]. Every place that needs the kind goes through
//! [`is_bookmark_url`], so the rule cannot drift between the store, the tree
//! builder, the filter and the exporters.
//!
//! ## Titles
//!
//! Titles may be empty. Bookmarks with an empty title display as `"Untitled"`
//! (see [`Node::display_title`]); folders keep their empty title as-is.
//!
//! ## Identity
//!
//! Two [`Node`]s are equal when their ids are equal. Use [`Node::same_shape`]
//! to compare title/url/children structurally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display fallback for bookmarks with an empty title.
pub const UNTITLED: &str = "Untitled";

/// Opaque, store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Folder,
    Bookmark,
}

/// The single kind predicate: a node is a bookmark iff its URL is non-empty.
pub fn is_bookmark_url(url: Option<&str>) -> bool {
    url.is_some_and(|u| !u.is_empty())
}

/// A node as the backing store returns it.
///
/// The field names follow the browser bookmark API (`parentId`, `dateAdded`),
/// which is also the JSON export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreNode {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<StoreNode>>,
}

impl StoreNode {
    pub fn is_bookmark(&self) -> bool {
        is_bookmark_url(self.url.as_deref())
    }
}

/// An annotated tree entry.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub index: Option<usize>,
    pub title: String,
    /// Only set for bookmarks; empty URLs are normalized away during annotation.
    pub url: Option<String>,
    pub date_added: Option<DateTime<Utc>>,
    /// Nesting level, first-level containers are 1.
    pub depth: u32,
    /// Always empty for bookmarks.
    pub children: Vec<Node>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Node {
    pub fn folder(id: impl Into<NodeId>, title: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            index: None,
            title: title.into(),
            url: None,
            date_added: None,
            depth: 1,
            children,
        }
    }

    pub fn bookmark(id: impl Into<NodeId>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            index: None,
            title: title.into(),
            url: Some(url.into()),
            date_added: None,
            depth: 1,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        if is_bookmark_url(self.url.as_deref()) {
            NodeKind::Bookmark
        } else {
            NodeKind::Folder
        }
    }

    pub fn is_bookmark(&self) -> bool {
        self.kind() == NodeKind::Bookmark
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    /// The title shown to users and matched by search.
    pub fn display_title(&self) -> &str {
        if self.is_bookmark() && self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Pre-order iterator over this node and all its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.walk().find(|n| n.id == id)
    }

    /// Structural comparison restricted to title, url and children.
    pub fn same_shape(&self, other: &Node) -> bool {
        self.title == other.title
            && self.url == other.url
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }

    /// Converts back into the store/export shape. Folders always carry a
    /// `children` array (possibly empty), bookmarks never do.
    pub fn to_store_node(&self) -> StoreNode {
        StoreNode {
            id: self.id.clone(),
            parent_id: self.parent_id.clone(),
            index: self.index,
            title: self.title.clone(),
            url: self.url.clone(),
            date_added: self.date_added,
            children: if self.is_folder() {
                Some(self.children.iter().map(Node::to_store_node).collect())
            } else {
                None
            },
        }
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_url_presence() {
        assert!(is_bookmark_url(Some("http://x")));
        assert!(!is_bookmark_url(Some("")));
        assert!(!is_bookmark_url(None));

        let mut node = Node::bookmark("1", "x", "");
        assert_eq!(node.kind(), NodeKind::Folder);
        node.url = Some("http://x".into());
        assert_eq!(node.kind(), NodeKind::Bookmark);
    }

    #[test]
    fn untitled_fallback_only_for_bookmarks() {
        let bookmark = Node::bookmark("1", "", "http://x");
        assert_eq!(bookmark.display_title(), UNTITLED);

        let folder = Node::folder("2", "", vec![]);
        assert_eq!(folder.display_title(), "");
    }

    #[test]
    fn equality_is_by_id() {
        let a = Node::folder("7", "A", vec![]);
        let b = Node::bookmark("7", "Other", "http://other");
        assert_eq!(a, b);
        assert!(!a.same_shape(&b));
    }

    #[test]
    fn walk_is_pre_order() {
        let tree = Node::folder(
            "a",
            "A",
            vec![
                Node::bookmark("x", "x", "http://x"),
                Node::folder("b", "B", vec![Node::bookmark("y", "y", "http://y")]),
            ],
        );
        let ids: Vec<&str> = tree.walk().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "x", "b", "y"]);
        assert_eq!(tree.find("y").map(|n| n.title.as_str()), Some("y"));
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn store_node_uses_browser_field_names() {
        let json = r#"{"id":"5","parentId":"1","index":0,"title":"Rust","url":"https://rust-lang.org","dateAdded":1700000000000}"#;
        let node: StoreNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.parent_id, Some(NodeId::from("1")));
        assert!(node.is_bookmark());
        assert_eq!(node.date_added.unwrap().timestamp_millis(), 1_700_000_000_000);

        let back = serde_json::to_string(&node).unwrap();
        assert!(back.contains("\"parentId\":\"1\""));
        assert!(back.contains("\"dateAdded\":1700000000000"));
        assert!(!back.contains("children"));
    }

    #[test]
    fn empty_folder_keeps_children_array() {
        let folder = Node::folder("3", "Empty", vec![]);
        let store = folder.to_store_node();
        assert_eq!(store.children, Some(vec![]));

        let bookmark = Node::bookmark("4", "b", "http://b").to_store_node();
        assert!(bookmark.children.is_none());
    }
}
