//! The flat record table behind every [`super::DataStore`] implementation.
//!
//! Backends only load and save a [`BookmarkTable`]; all structural rules
//! (where a node may be created, which moves are cyclic, what a subtree
//! removal touches) live here so memory and file stores behave identically.

use super::{CreateDetails, MoveDestination, UpdateChanges};
use crate::error::{BookmarkError, Result};
use crate::model::{is_bookmark_url, NodeId, StoreNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Id of the synthetic, title-less root container.
pub const ROOT_ID: &str = "0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub id: NodeId,
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    pub date_added: DateTime<Utc>,
    /// Ordered child ids; always empty for bookmarks.
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Synthetic containers that can be neither moved, renamed nor removed.
    #[serde(default)]
    pub permanent: bool,
}

impl BookmarkRecord {
    fn is_bookmark(&self) -> bool {
        is_bookmark_url(self.url.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkTable {
    pub next_id: u64,
    pub records: BTreeMap<NodeId, BookmarkRecord>,
}

impl Default for BookmarkTable {
    fn default() -> Self {
        Self::seeded()
    }
}

impl BookmarkTable {
    /// A fresh table holding the root and the two standard containers.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut records = BTreeMap::new();
        let container = |id: &str, parent: Option<&str>, title: &str, children: Vec<NodeId>| {
            BookmarkRecord {
                id: NodeId::from(id),
                parent_id: parent.map(NodeId::from),
                title: title.to_string(),
                url: None,
                date_added: now,
                children,
                permanent: true,
            }
        };
        records.insert(
            NodeId::from(ROOT_ID),
            container(ROOT_ID, None, "", vec!["1".into(), "2".into()]),
        );
        records.insert(
            NodeId::from("1"),
            container("1", Some(ROOT_ID), "Bookmarks bar", vec![]),
        );
        records.insert(
            NodeId::from("2"),
            container("2", Some(ROOT_ID), "Other bookmarks", vec![]),
        );
        Self {
            next_id: 3,
            records,
        }
    }

    fn record(&self, id: &NodeId) -> Result<&BookmarkRecord> {
        self.records
            .get(id)
            .ok_or_else(|| BookmarkError::NotFound(id.clone()))
    }

    fn record_mut(&mut self, id: &NodeId) -> Result<&mut BookmarkRecord> {
        self.records
            .get_mut(id)
            .ok_or_else(|| BookmarkError::NotFound(id.clone()))
    }

    fn index_in_parent(&self, record: &BookmarkRecord) -> Option<usize> {
        let parent = self.records.get(record.parent_id.as_ref()?)?;
        parent.children.iter().position(|c| c == &record.id)
    }

    fn to_store_node(&self, record: &BookmarkRecord, deep: bool) -> StoreNode {
        let children = if deep && !record.is_bookmark() {
            Some(
                record
                    .children
                    .iter()
                    .filter_map(|id| self.records.get(id))
                    .map(|child| self.to_store_node(child, true))
                    .collect(),
            )
        } else {
            None
        };
        StoreNode {
            id: record.id.clone(),
            parent_id: record.parent_id.clone(),
            index: self.index_in_parent(record),
            title: record.title.clone(),
            url: record.url.clone(),
            date_added: Some(record.date_added),
            children,
        }
    }

    pub fn get(&self, id: &NodeId) -> Result<StoreNode> {
        let record = self.record(id)?;
        Ok(self.to_store_node(record, false))
    }

    pub fn list_children(&self, id: &NodeId) -> Result<Vec<StoreNode>> {
        let record = self.record(id)?;
        Ok(record
            .children
            .iter()
            .filter_map(|child| self.records.get(child))
            .map(|child| self.to_store_node(child, false))
            .collect())
    }

    pub fn get_subtree(&self, id: &NodeId) -> Result<StoreNode> {
        let record = self.record(id)?;
        Ok(self.to_store_node(record, true))
    }

    fn writable_folder(&self, id: &NodeId) -> Result<&BookmarkRecord> {
        let parent = self.record(id)?;
        if parent.is_bookmark() {
            return Err(BookmarkError::MutationFailure(format!(
                "Parent {} is a bookmark, not a folder",
                id
            )));
        }
        if id == ROOT_ID {
            return Err(BookmarkError::MutationFailure(
                "Can't modify the root bookmark folders".to_string(),
            ));
        }
        Ok(parent)
    }

    fn modifiable(&self, id: &NodeId) -> Result<&BookmarkRecord> {
        let record = self.record(id)?;
        if record.permanent {
            return Err(BookmarkError::MutationFailure(format!(
                "Can't modify the root bookmark folder {}",
                id
            )));
        }
        Ok(record)
    }

    pub fn create(&mut self, details: CreateDetails) -> Result<StoreNode> {
        self.writable_folder(&details.parent_id)?;

        let id = NodeId::new(self.next_id.to_string());
        self.next_id += 1;

        let record = BookmarkRecord {
            id: id.clone(),
            parent_id: Some(details.parent_id.clone()),
            title: details.title,
            url: details.url.filter(|u| !u.is_empty()),
            date_added: Utc::now(),
            children: Vec::new(),
            permanent: false,
        };
        self.records.insert(id.clone(), record);
        self.record_mut(&details.parent_id)?.children.push(id.clone());
        self.get(&id)
    }

    pub fn update(&mut self, id: &NodeId, changes: UpdateChanges) -> Result<StoreNode> {
        let is_bookmark = self.modifiable(id)?.is_bookmark();
        if let Some(url) = &changes.url {
            if !is_bookmark {
                return Err(BookmarkError::MutationFailure(
                    "Can't set URL of a bookmark folder".to_string(),
                ));
            }
            if url.is_empty() {
                return Err(BookmarkError::MutationFailure("Invalid URL".to_string()));
            }
        }

        let record = self.record_mut(id)?;
        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(url) = changes.url {
            record.url = Some(url);
        }
        self.get(id)
    }

    /// True if `candidate` sits somewhere below `ancestor`. Walks the whole
    /// parent chain; a chain that loops back on itself is an error.
    fn is_descendant_of(&self, candidate: &NodeId, ancestor: &NodeId) -> Result<bool> {
        let mut seen = BTreeSet::new();
        let mut current = candidate.clone();
        loop {
            match &self.record(&current)?.parent_id {
                Some(parent) if parent == ancestor => return Ok(true),
                Some(parent) => {
                    if !seen.insert(parent.clone()) {
                        return Err(BookmarkError::MutationFailure(format!(
                            "Parent chain of {} loops at {}",
                            candidate, parent
                        )));
                    }
                    current = parent.clone();
                }
                None => return Ok(false),
            }
        }
    }

    pub fn move_node(&mut self, id: &NodeId, destination: MoveDestination) -> Result<StoreNode> {
        self.modifiable(id)?;
        self.writable_folder(&destination.parent_id)?;

        if id == &destination.parent_id || self.is_descendant_of(&destination.parent_id, id)? {
            return Err(BookmarkError::MutationFailure(
                "Can't move a folder into its own descendant".to_string(),
            ));
        }

        let old_parent = self.record(id)?.parent_id.clone();
        if let Some(old_parent) = old_parent {
            self.record_mut(&old_parent)?.children.retain(|c| c != id);
        }

        let siblings = &mut self.record_mut(&destination.parent_id)?.children;
        let position = destination
            .index
            .map(|i| i.min(siblings.len()))
            .unwrap_or(siblings.len());
        siblings.insert(position, id.clone());

        self.record_mut(id)?.parent_id = Some(destination.parent_id);
        self.get(id)
    }

    pub fn remove_subtree(&mut self, id: &NodeId) -> Result<()> {
        let parent_id = self.modifiable(id)?.parent_id.clone();

        let mut doomed = vec![id.clone()];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let children = self.record(&doomed[cursor])?.children.clone();
            doomed.extend(children);
            cursor += 1;
        }
        for gone in &doomed {
            self.records.remove(gone);
        }

        if let Some(parent) = parent_id {
            self.record_mut(&parent)?.children.retain(|c| c != id);
        }
        Ok(())
    }
}
