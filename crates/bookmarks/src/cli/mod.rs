//! # CLI Behavior
//!
//! This is **one possible UI client** for the bookmark engine.
//!
//! ## Naked Execution
//!
//! Running `bookmarks` with no arguments prints the tree, honoring the
//! persisted expansion state. `bookmarks tree --all` ignores it and prints
//! every folder open.
//!
//! ## Ids
//!
//! Every node is addressed by its store id, shown dimmed next to each entry in
//! the tree. `0` is the invisible root; `1` ("Bookmarks bar") and `2` ("Other
//! bookmarks") are permanent and cannot be moved, renamed or deleted.
//!
//! ## Prompts
//!
//! `rename <id>` without a title asks for one on stdin; an empty answer
//! cancels. `rm <id>` asks for confirmation unless `--yes` is given.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command handlers
//! - `render`: tree and message formatting
//! - `setup`: argument parsing via clap
//! - `styles`: light and dark palettes

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
