//! Drag-and-drop reparenting.
//!
//! A drop is silently skipped when the source and target are the same node or
//! either of them is a protection root. Protection roots cannot even be
//! picked up ([`can_drag`]). Everything else goes to the store, which has the
//! final word on cycles: moving a folder into its own descendant comes back as
//! a [`crate::error::BookmarkError::MutationFailure`].

use crate::commands::{CmdMessage, CmdResult, SkipReason};
use crate::config::BookmarksConfig;
use crate::error::{BookmarkError, Result};
use crate::model::NodeId;
use crate::store::{DataStore, MoveDestination};
use tracing::debug;

/// Whether a drag may start on `id`.
pub fn can_drag(config: &BookmarksConfig, id: &NodeId) -> bool {
    !config.is_protected(id)
}

/// Whether `target` accepts drops at all.
pub fn can_drop_on(config: &BookmarksConfig, target: &NodeId) -> bool {
    !config.is_protected(target)
}

/// Checks the drop preconditions without touching the store.
pub fn validate(config: &BookmarksConfig, source: &NodeId, target: &NodeId) -> Option<SkipReason> {
    if source == target {
        Some(SkipReason::SameNode)
    } else if !can_drop_on(config, target) {
        Some(SkipReason::Protected(target.clone()))
    } else if !can_drag(config, source) {
        Some(SkipReason::Protected(source.clone()))
    } else {
        None
    }
}

pub fn run<S: DataStore>(
    store: &mut S,
    config: &BookmarksConfig,
    source: &NodeId,
    target: &NodeId,
) -> Result<CmdResult> {
    if let Some(reason) = validate(config, source, target) {
        debug!(%source, %target, %reason, "reparent skipped");
        return Ok(CmdResult::skipped(reason));
    }

    let moved = store
        .move_node(
            source,
            MoveDestination {
                parent_id: target.clone(),
                index: None,
            },
        )
        .map_err(BookmarkError::into_mutation)?;

    let message = format!("Moved '{}' into {}", moved.title, target);
    Ok(CmdResult::changed(vec![moved]).with_message(CmdMessage::success(message)))
}
