//! Export of a folder subtree as a Netscape bookmark file, JSON or CSV.
//!
//! All three renderers walk the subtree once, pre-order. Titles and URLs are
//! written verbatim: neither the HTML nor the CSV output escapes anything, so a
//! title containing `"` or `<` produces output other tools may misread.

use crate::config::BookmarksConfig;
use crate::error::{BookmarkError, Result};
use crate::model::{Node, NodeId};
use crate::store::DataStore;
use crate::tree::annotate;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const HTML_HEADER: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
<TITLE>Bookmarks</TITLE>\n\
<H1>Bookmarks</H1>\n\
<DL><p>\n";

const CSV_HEADER: &str = "Title,URL,Folder\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Html,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn all() -> [ExportFormat; 3] {
        [ExportFormat::Html, ExportFormat::Json, ExportFormat::Csv]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = BookmarkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(BookmarkError::Api(format!(
                "Unknown export format '{}' (expected html, json or csv)",
                other
            ))),
        }
    }
}

/// A rendered export, ready to be written wherever the caller wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content: String,
}

pub fn render(root: &Node, format: ExportFormat, indent: usize) -> Result<String> {
    match format {
        ExportFormat::Html => Ok(render_html(root, indent)),
        ExportFormat::Json => render_json(root),
        ExportFormat::Csv => Ok(render_csv(root)),
    }
}

pub fn render_html(root: &Node, indent: usize) -> String {
    let mut out = String::from(HTML_HEADER);
    html_node(root, 1, indent, &mut out);
    out.push_str("</DL><p>");
    out
}

fn html_node(node: &Node, level: usize, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent * level);
    match &node.url {
        Some(url) if node.is_bookmark() => {
            out.push_str(&format!("{}<DT><A HREF=\"{}\">{}</A>\n", pad, url, node.title));
        }
        _ => {
            out.push_str(&format!("{}<DT><H3>{}</H3>\n", pad, node.title));
            out.push_str(&format!("{}<DL><p>\n", pad));
            for child in &node.children {
                html_node(child, level + 1, indent, out);
            }
            out.push_str(&format!("{}</DL><p>\n", pad));
        }
    }
}

pub fn render_json(root: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(&root.to_store_node())?)
}

pub fn render_csv(root: &Node) -> String {
    let mut out = String::from(CSV_HEADER);
    csv_node(root, "", &mut out);
    out
}

fn csv_node(node: &Node, path: &str, out: &mut String) {
    match &node.url {
        Some(url) if node.is_bookmark() => {
            out.push_str(&format!("\"{}\",\"{}\",\"{}\"\n", node.title, url, path));
        }
        _ => {
            let path = if path.is_empty() {
                node.title.clone()
            } else {
                format!("{}/{}", path, node.title)
            };
            for child in &node.children {
                csv_node(child, &path, out);
            }
        }
    }
}

/// Fetches the subtree under `target` (the collection root when `None`) and
/// renders it.
pub fn run<S: DataStore>(
    store: &S,
    config: &BookmarksConfig,
    target: Option<&NodeId>,
    format: ExportFormat,
) -> Result<ExportFile> {
    let target = target.cloned().unwrap_or_else(|| config.root_id());
    let subtree = store
        .get_subtree(&target)
        .map_err(BookmarkError::into_fetch)?;
    let root = annotate(subtree, 1);

    let content = render(&root, format, config.indent_spaces)?;
    debug!(%target, %format, bytes = content.len(), "export rendered");

    Ok(ExportFile {
        filename: format!("bookmarks.{}", format.extension()),
        content,
    })
}
