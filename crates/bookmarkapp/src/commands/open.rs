use crate::commands::{CmdResult, SkipReason};
use crate::error::{BookmarkError, Result};
use crate::model::NodeId;
use crate::store::DataStore;

/// Resolves the URL to open for `id`. Folders have nothing to open.
pub fn run<S: DataStore>(store: &S, id: &NodeId) -> Result<CmdResult> {
    let node = store.get(id).map_err(BookmarkError::into_fetch)?;
    if !node.is_bookmark() {
        return Ok(CmdResult::skipped(SkipReason::NotABookmark(id.clone())));
    }
    Ok(CmdResult {
        url: node.url.clone(),
        affected: vec![node],
        ..Default::default()
    })
}
