//! # Rendering
//!
//! Pure formatting: every function takes library values and returns a
//! `String`, leaving printing to the handlers.
//!
//! ## Tree Layout
//!
//! One line per node, two spaces of indent per level below the first:
//!
//! ```text
//! ▾ Bookmarks bar  1  (2 folders - 2 bookmarks)
//!   ▸ A  3  (1 folder - 2 bookmarks)
//! ▾ Other bookmarks  2  (0 folders - 0 bookmarks)
//! ```
//!
//! Bookmarks render as `• title  url  id`. Collapsed folders hide their
//! children; during a search, folders holding a match are forced open and
//! entries that match are highlighted.

use super::styles::Palette;
use bookmarkapp::commands::stats::count;
use bookmarkapp::commands::{CmdMessage, MessageLevel, SkipReason};
use bookmarkapp::model::{Node, NodeId};
use bookmarkapp::search::{self, Visibility};
use bookmarkapp::tree::BookmarkTree;

const INDENT: &str = "  ";
const OPEN: &str = "▾";
const CLOSED: &str = "▸";
const LINK: &str = "•";

pub struct TreeView<'a> {
    pub is_expanded: &'a dyn Fn(&NodeId) -> bool,
    pub visibility: Option<&'a Visibility>,
    pub query: &'a str,
}

pub fn render_tree(tree: &BookmarkTree, view: &TreeView<'_>, palette: &Palette) -> String {
    let mut out = String::new();
    for root in &tree.roots {
        render_node(root, view, palette, &mut out);
    }
    if out.is_empty() {
        out.push_str(&format!("{}\n", palette.muted.apply_to("No bookmarks found.")));
    }
    out
}

fn render_node(node: &Node, view: &TreeView<'_>, palette: &Palette, out: &mut String) {
    if let Some(vis) = view.visibility {
        if !vis.is_visible(&node.id) {
            return;
        }
    }

    let indent = INDENT.repeat(node.depth.saturating_sub(1) as usize);
    let needle = view.query.to_lowercase();
    let hit = !needle.is_empty() && search::matches(node, &needle);
    let title = if hit {
        palette.highlight.apply_to(node.display_title()).to_string()
    } else if node.is_folder() {
        palette.folder.apply_to(node.display_title()).to_string()
    } else {
        palette.bookmark.apply_to(node.display_title()).to_string()
    };
    let id = palette.id.apply_to(node.id.as_str());

    if let (true, Some(url)) = (node.is_bookmark(), node.url.as_deref()) {
        out.push_str(&format!(
            "{}{} {}  {}  {}\n",
            indent,
            LINK,
            title,
            palette.url.apply_to(url),
            id
        ));
        return;
    }

    let expanded = (view.is_expanded)(&node.id);
    let stats = palette.muted.apply_to(format!("({})", count(node)));
    out.push_str(&format!(
        "{}{} {}  {}  {}\n",
        indent,
        if expanded { OPEN } else { CLOSED },
        title,
        id,
        stats
    ));
    if expanded {
        for child in &node.children {
            render_node(child, view, palette, out);
        }
    }
}

pub fn render_messages(messages: &[CmdMessage], palette: &Palette) -> String {
    messages
        .iter()
        .map(|m| {
            let style = match m.level {
                MessageLevel::Info => &palette.muted,
                MessageLevel::Success => &palette.success,
                MessageLevel::Warning => &palette.warning,
                MessageLevel::Error => &palette.error,
            };
            format!("{}\n", style.apply_to(&m.content))
        })
        .collect()
}

pub fn render_skip(reason: &SkipReason, palette: &Palette) -> String {
    let text = format!("Nothing changed: {}", reason);
    let style = if reason.is_validation() {
        &palette.warning
    } else {
        &palette.muted
    };
    format!("{}\n", style.apply_to(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::styles::palette;
    use bookmarkapp::prefs::Theme;

    fn scenario() -> BookmarkTree {
        let mut a = Node::folder(
            "3",
            "A",
            vec![
                Node::bookmark("4", "x", "http://x"),
                Node::folder("5", "B", vec![Node::bookmark("6", "y", "http://y")]),
            ],
        );
        // Node constructors leave depth at 1.
        fn set_depth(node: &mut Node, depth: u32) {
            node.depth = depth;
            for child in &mut node.children {
                set_depth(child, depth + 1);
            }
        }
        set_depth(&mut a, 1);
        BookmarkTree::new(vec![a])
    }

    fn plain() -> &'static Palette {
        console::set_colors_enabled(false);
        palette(Theme::Light)
    }

    #[test]
    fn expanded_tree_shows_everything() {
        let all = |_: &NodeId| true;
        let view = TreeView {
            is_expanded: &all,
            visibility: None,
            query: "",
        };
        let out = render_tree(&scenario(), &view, plain());
        assert_eq!(
            out,
            "▾ A  3  (1 folder - 2 bookmarks)\n\
             \u{20}\u{20}• x  http://x  4\n\
             \u{20}\u{20}▾ B  5  (0 folders - 1 bookmark)\n\
             \u{20}\u{20}\u{20}\u{20}• y  http://y  6\n"
        );
    }

    #[test]
    fn collapsed_folders_hide_children() {
        let none = |_: &NodeId| false;
        let view = TreeView {
            is_expanded: &none,
            visibility: None,
            query: "",
        };
        let out = render_tree(&scenario(), &view, plain());
        assert_eq!(out, "▸ A  3  (1 folder - 2 bookmarks)\n");
    }

    #[test]
    fn search_hides_non_matches() {
        let tree = scenario();
        let vis = search::filter(&tree, "y");
        let forced = |id: &NodeId| vis.is_force_expanded(id);
        let view = TreeView {
            is_expanded: &forced,
            visibility: Some(&vis),
            query: "y",
        };
        let out = render_tree(&tree, &view, plain());
        assert!(out.contains("• y  http://y  6"));
        assert!(!out.contains("http://x"));
    }

    #[test]
    fn empty_result_says_so() {
        let tree = scenario();
        let vis = search::filter(&tree, "nothing");
        let none = |_: &NodeId| false;
        let view = TreeView {
            is_expanded: &none,
            visibility: Some(&vis),
            query: "nothing",
        };
        assert_eq!(render_tree(&tree, &view, plain()), "No bookmarks found.\n");
    }

    #[test]
    fn skip_reasons_are_explained() {
        let out = render_skip(&SkipReason::Protected("1".into()), plain());
        assert_eq!(out, "Nothing changed: 1 is a protected root folder\n");
    }
}
