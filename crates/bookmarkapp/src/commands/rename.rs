use crate::commands::{CmdMessage, CmdResult, SkipReason};
use crate::config::BookmarksConfig;
use crate::error::{BookmarkError, Result};
use crate::model::NodeId;
use crate::store::{DataStore, UpdateChanges};

/// Retitles `id`. `title` is the prompt's answer: `None` (dismissed) and an
/// empty string both leave the node alone.
pub fn run<S: DataStore>(
    store: &mut S,
    config: &BookmarksConfig,
    id: &NodeId,
    title: Option<&str>,
) -> Result<CmdResult> {
    if config.is_protected(id) {
        return Ok(CmdResult::skipped(SkipReason::Protected(id.clone())));
    }
    let title = match title {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(CmdResult::skipped(SkipReason::Cancelled)),
    };

    let node = store
        .update(
            id,
            UpdateChanges {
                title: Some(title.to_string()),
                url: None,
            },
        )
        .map_err(BookmarkError::into_mutation)?;

    let message = format!("Renamed {} to '{}'", node.id, node.title);
    Ok(CmdResult::changed(vec![node]).with_message(CmdMessage::success(message)))
}
