use crate::commands::{CmdMessage, CmdResult, SkipReason};
use crate::config::BookmarksConfig;
use crate::error::{BookmarkError, Result};
use crate::model::NodeId;
use crate::store::DataStore;

/// Removes `id` and everything below it. `confirmed` is the user's answer to
/// the confirmation dialog.
pub fn run<S: DataStore>(
    store: &mut S,
    config: &BookmarksConfig,
    id: &NodeId,
    confirmed: bool,
) -> Result<CmdResult> {
    if config.is_protected(id) {
        return Ok(CmdResult::skipped(SkipReason::Protected(id.clone())));
    }
    if !confirmed {
        return Ok(CmdResult::skipped(SkipReason::Declined));
    }

    let node = store.get(id).map_err(BookmarkError::into_mutation)?;
    store
        .remove_subtree(id)
        .map_err(BookmarkError::into_mutation)?;

    let message = format!("Deleted '{}' ({})", node.title, node.id);
    Ok(CmdResult::changed(vec![node]).with_message(CmdMessage::success(message)))
}
