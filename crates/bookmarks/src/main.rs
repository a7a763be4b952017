//! # Bookmarks CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/bookmarkapp/`: UI-agnostic engine (tree, search, reparent, export)
//! - `crates/bookmarks/`: this terminal client
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/bookmarks/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring, logging, dispatch (commands.rs)          │
//! │  - Terminal rendering with console styles (render.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/bookmarkapp/src/api.rs)                  │
//! │  - Owns store, prefs and the current tree                   │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI is responsible for **all** user-facing concerns: argument parsing,
//! prompts and confirmations on stdin, opening URLs, printing, and exit codes.
//!
//! ## Testing Approach
//!
//! - `render.rs` is tested with hand-built trees, without a terminal.
//! - `tests/cli_e2e.rs` drives the compiled binary against a temp data dir.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
