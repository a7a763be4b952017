//! # Bookmarks Architecture
//!
//! A **UI-agnostic bookmark tree engine**. It builds an annotated folder tree
//! from a backing store, filters it, reparents nodes, and exports subtrees as
//! Netscape HTML, JSON or CSV. The `bookmarks` binary is one client; nothing
//! in here knows about terminals.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the `bookmarks` CLI, or any other UI)              │
//! │  - Implements `Interaction`: prompts, confirms, open URL    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns store, prefs, session state and the current tree    │
//! │  - Rebuilds the tree after each successful mutation         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (tree.rs, search.rs, expansion.rs, commands/*.rs)   │
//! │  - Tree building, filtering, reparenting, export            │
//! │  - Plain Rust in, plain Rust out                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/, prefs.rs)                                 │
//! │  - `DataStore`: the bookmark hierarchy                      │
//! │  - `PrefsStore`: small persisted UI values                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Engine and commands**: unit tests against [`store::memory::InMemoryStore`].
//!    [`store::memory::fixtures::CountingStore`] records every store call, so
//!    tests can assert that a no-op really made none.
//! 2. **API**: dispatch, rebuild counts and persisted state, with
//!    [`prefs::MemPrefs`] and [`dispatch::fixtures::ScriptedInteraction`].
//! 3. **Filesystem**: integration tests under `tests/` use a temp dir.
//!
//! Enable the `test_utils` feature to use the fixtures from other crates.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: reparent, rename, delete, open, create, export, stats
//! - [`tree`]: builds [`tree::BookmarkTree`] from the store
//! - [`search`]: visibility filter and keystroke debouncer
//! - [`expansion`]: persisted open/closed folder state
//! - [`session`]: selection, bulk mode, context-menu target
//! - [`dispatch`]: context actions and the [`dispatch::Interaction`] seam
//! - [`store`]: storage abstraction and implementations
//! - [`prefs`]: UI preferences (theme, scroll position, ...)
//! - [`model`]: `NodeId`, `StoreNode`, `Node` and the kind rule
//! - [`config`]: configuration loading
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod expansion;
pub mod model;
pub mod prefs;
pub mod search;
pub mod session;
pub mod store;
pub mod tree;
