//! # API Facade
//!
//! [`BookmarksApi`] is the single entry point for every UI. It owns the store,
//! the preferences, the session and the most recently built tree, and wires the
//! command layer to them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the command functions in [`crate::commands`]
//! - **Rebuilds** the tree after every successful mutation, exactly once
//! - **Persists** UI state (expansion, theme, scroll position) through [`PrefsStore`]
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Terminal or file I/O**: exports come back as [`ExportFile`] values
//! - **Optimistic updates**: a rejected mutation leaves the current tree as is
//!
//! ## Generic Over DataStore and PrefsStore
//!
//! - Production: `BookmarksApi<FileStore, FilePrefs>`
//! - Testing: `BookmarksApi<InMemoryStore, MemPrefs>`
//!
//! ## Search
//!
//! Keystrokes go to [`BookmarksApi::search_input`], which only schedules the
//! query. The caller then drives [`BookmarksApi::search_tick`] with the
//! current time; the filter runs once the quiet period has passed. Use
//! [`BookmarksApi::set_query`] to apply a query immediately.

use crate::commands::{self, export::ExportFile, export::ExportFormat, stats::FolderStats, CmdResult};
use crate::config::BookmarksConfig;
use crate::dispatch::{self, ActionOutcome, ContextAction, Interaction, FOLDER_PROMPT};
use crate::error::{BookmarkError, Result};
use crate::expansion::ExpansionState;
use crate::model::NodeId;
use crate::prefs::{self, PrefsStore, Theme};
use crate::search::{self, SearchDebouncer, Visibility};
use crate::session::SessionState;
use crate::store::DataStore;
use crate::tree::{self, BookmarkTree};
use std::time::Instant;
use tracing::{debug, error, info};

pub struct BookmarksApi<S: DataStore, P: PrefsStore> {
    store: S,
    prefs: P,
    config: BookmarksConfig,
    session: SessionState,
    tree: BookmarkTree,
    expansion: ExpansionState,
    debouncer: SearchDebouncer,
    query: String,
    visibility: Visibility,
    generation: u64,
}

impl<S: DataStore, P: PrefsStore> BookmarksApi<S, P> {
    /// Creates the facade and restores persisted expansion state. The tree is
    /// empty until [`BookmarksApi::load`] runs.
    pub fn new(store: S, prefs: P, config: BookmarksConfig) -> Result<Self> {
        let expansion = ExpansionState::load(&prefs)?;
        Ok(Self {
            session: SessionState::new(config.default_parent_id()),
            debouncer: SearchDebouncer::new(config.search_debounce()),
            store,
            prefs,
            config,
            tree: BookmarkTree::default(),
            expansion,
            query: String::new(),
            visibility: Visibility::default(),
            generation: 0,
        })
    }

    /// First build of the session. Seeds the expansion state when nothing
    /// was persisted yet.
    pub fn load(&mut self) -> Result<&BookmarkTree> {
        self.refresh()?;
        if self.expansion.seed_first_run(&mut self.prefs, &self.tree)? {
            info!("expanded first-level folders on first run");
        }
        Ok(&self.tree)
    }

    /// Rebuilds the tree from the store. On failure the previous tree stays.
    pub fn refresh(&mut self) -> Result<&BookmarkTree> {
        let root = self.config.root_id();
        let tree = tree::build(&self.store, &root).inspect_err(|e| {
            error!(error = %e, "failed to load bookmarks");
        })?;
        self.tree = tree;
        self.generation += 1;
        self.visibility = search::filter(&self.tree, &self.query);
        debug!(generation = self.generation, "tree replaced");
        Ok(&self.tree)
    }

    fn after_mutation(&mut self, res: CmdResult) -> Result<CmdResult> {
        if res.changed {
            self.refresh()?;
        }
        Ok(res)
    }

    fn log_rejection(action: &str, e: BookmarkError) -> BookmarkError {
        error!(action, error = %e, "bookmark change rejected");
        e
    }

    pub fn tree(&self) -> &BookmarkTree {
        &self.tree
    }

    /// Number of completed tree builds.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &BookmarksConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    // --- Expansion ---

    /// Open in the UI: persisted as expanded, or forced open by the search.
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expansion.is_expanded(id) || self.visibility.is_force_expanded(id)
    }

    /// Only folders of the current tree have an expansion state.
    pub fn set_expanded(&mut self, id: &NodeId, expanded: bool) -> Result<()> {
        self.require_folder(id)?;
        self.expansion.set_expanded(&mut self.prefs, id, expanded)
    }

    pub fn toggle_folder(&mut self, id: &NodeId) -> Result<bool> {
        self.require_folder(id)?;
        self.expansion.toggle(&mut self.prefs, id)
    }

    fn require_folder(&self, id: &NodeId) -> Result<()> {
        match self.tree.find(id.as_str()) {
            Some(node) if node.is_folder() => Ok(()),
            Some(_) => Err(BookmarkError::Api(format!(
                "{} is a bookmark, not a folder",
                id
            ))),
            None => Err(BookmarkError::NotFound(id.clone())),
        }
    }

    // --- Search ---

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// The current tree restricted to what the query leaves visible.
    pub fn visible_tree(&self) -> BookmarkTree {
        self.visibility.apply(&self.tree)
    }

    /// Records a keystroke; the query runs after the quiet period.
    pub fn search_input(&mut self, query: &str, now: Instant) {
        self.debouncer.schedule(query, now);
    }

    /// Applies the pending query if it is due. Returns whether the visibility
    /// changed.
    pub fn search_tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => {
                self.set_query(&query);
                true
            }
            None => false,
        }
    }

    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn set_query(&mut self, query: &str) {
        self.debouncer.cancel();
        self.query = query.to_string();
        self.visibility = search::filter(&self.tree, &self.query);
        debug!(query, visible = self.visibility.visible.len(), "filter applied");
    }

    // --- Structural edits ---

    pub fn can_drag(&self, id: &NodeId) -> bool {
        commands::reparent::can_drag(&self.config, id)
    }

    pub fn reparent(&mut self, source: &NodeId, target: &NodeId) -> Result<CmdResult> {
        let res = commands::reparent::run(&mut self.store, &self.config, source, target)
            .map_err(|e| Self::log_rejection("reparent", e))?;
        self.after_mutation(res)
    }

    pub fn rename(&mut self, id: &NodeId, title: Option<&str>) -> Result<CmdResult> {
        let res = commands::rename::run(&mut self.store, &self.config, id, title)
            .map_err(|e| Self::log_rejection("rename", e))?;
        self.after_mutation(res)
    }

    pub fn delete(&mut self, id: &NodeId, confirmed: bool) -> Result<CmdResult> {
        let res = commands::delete::run(&mut self.store, &self.config, id, confirmed)
            .map_err(|e| Self::log_rejection("delete", e))?;
        self.after_mutation(res)
    }

    /// New folder inside the selected folder.
    pub fn create_folder(&mut self, title: &str) -> Result<CmdResult> {
        let parent = self.session.selected_folder().clone();
        let res = commands::create::create_folder(&mut self.store, &parent, title)
            .map_err(|e| Self::log_rejection("create folder", e))?;
        self.after_mutation(res)
    }

    /// Like [`BookmarksApi::create_folder`], asking for the title.
    pub fn prompt_create_folder<I: Interaction>(&mut self, ui: &mut I) -> Result<CmdResult> {
        let title = ui.prompt(FOLDER_PROMPT, "").unwrap_or_default();
        self.create_folder(&title)
    }

    /// New bookmark inside the selected folder.
    pub fn save_bookmark(&mut self, title: &str, url: &str) -> Result<CmdResult> {
        let parent = self.session.selected_folder().clone();
        let res = commands::create::save_bookmark(&mut self.store, &parent, title, url)
            .map_err(|e| Self::log_rejection("save bookmark", e))?;
        self.after_mutation(res)
    }

    pub fn open_url(&self, id: &NodeId) -> Result<CmdResult> {
        commands::open::run(&self.store, id)
    }

    // --- Session and dispatch ---

    pub fn toggle_bulk_mode(&mut self) -> bool {
        self.session.toggle_bulk_mode()
    }

    pub fn select_folder(&mut self, id: &NodeId) {
        self.session.select_folder(id.clone());
    }

    /// A click on a node. In bulk mode it toggles selection. Otherwise a
    /// bookmark opens and a folder becomes the selected folder and toggles.
    pub fn click<I: Interaction>(&mut self, id: &NodeId, ui: &mut I) -> Result<ActionOutcome> {
        if self.session.bulk_mode() {
            let selected = self.session.toggle_selected(id);
            return Ok(ActionOutcome::Selection {
                id: id.clone(),
                selected,
            });
        }

        let is_bookmark = match self.tree.find(id.as_str()) {
            Some(node) => node.is_bookmark(),
            None => self.store.get(id).map_err(BookmarkError::into_fetch)?.is_bookmark(),
        };

        if is_bookmark {
            let res = commands::open::run(&self.store, id)?;
            if let Some(url) = &res.url {
                ui.open_url(url)?;
            }
            return Ok(ActionOutcome::Command(res));
        }

        self.session.select_folder(id.clone());
        let expanded = self.toggle_folder(id)?;
        Ok(ActionOutcome::FolderToggled {
            id: id.clone(),
            expanded,
        })
    }

    pub fn open_context_menu(&mut self, id: &NodeId) {
        self.session.open_context_menu(id.clone());
    }

    /// Runs `action` against the target captured by
    /// [`BookmarksApi::open_context_menu`], closing the menu.
    pub fn run_action<I: Interaction>(
        &mut self,
        action: ContextAction,
        ui: &mut I,
    ) -> Result<ActionOutcome> {
        let target = self
            .session
            .close_context_menu()
            .ok_or_else(|| BookmarkError::Api("No context menu is open".to_string()))?;
        let outcome = dispatch::run_context_action(&mut self.store, &self.config, &target, action, ui)
            .map_err(|e| Self::log_rejection("context action", e))?;
        if outcome.changed() {
            self.refresh()?;
        }
        Ok(outcome)
    }

    // --- Export and stats ---

    /// Exports `target`, or the whole collection when `None`.
    pub fn export(&self, target: Option<&NodeId>, format: ExportFormat) -> Result<ExportFile> {
        commands::export::run(&self.store, &self.config, target, format)
    }

    /// Counts for one folder of the current tree.
    pub fn folder_stats(&self, id: &NodeId) -> Option<FolderStats> {
        self.tree.find(id.as_str()).map(commands::stats::count)
    }

    pub fn collection_stats(&self) -> Result<FolderStats> {
        commands::stats::collection_stats(&self.store, &self.config.root_id())
    }

    // --- UI preferences ---

    pub fn theme(&self) -> Result<Theme> {
        prefs::theme(&self.prefs)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        prefs::set_theme(&mut self.prefs, theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        prefs::toggle_theme(&mut self.prefs)
    }

    pub fn scroll_position(&self) -> Result<Option<u32>> {
        prefs::scroll_position(&self.prefs)
    }

    pub fn set_scroll_position(&mut self, position: u32) -> Result<()> {
        prefs::set_scroll_position(&mut self.prefs, position)
    }

    pub fn popup_height(&self) -> Result<Option<u32>> {
        prefs::popup_height(&self.prefs)
    }

    pub fn set_popup_height(&mut self, height: u32) -> Result<()> {
        prefs::set_popup_height(&mut self.prefs, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SkipReason;
    use crate::dispatch::fixtures::ScriptedInteraction;
    use crate::prefs::MemPrefs;
    use crate::store::memory::fixtures::{CountingStore, Names, StoreFixture};
    use crate::store::memory::InMemoryStore;
    use std::time::Duration;

    type TestApi = BookmarksApi<CountingStore<InMemoryStore>, MemPrefs>;

    fn make_api() -> (TestApi, Names) {
        let (store, ids) = StoreFixture::scenario().into_parts();
        let mut api = BookmarksApi::new(
            CountingStore::new(store),
            MemPrefs::new(),
            BookmarksConfig::default(),
        )
        .unwrap();
        api.load().unwrap();
        api.store().clear();
        (api, ids)
    }

    #[test]
    fn load_seeds_first_level_expansion() {
        let (api, _ids) = make_api();
        assert!(api.is_expanded(&"1".into()));
        assert!(api.is_expanded(&"2".into()));
        assert_eq!(api.prefs().write_count(), 1);
        assert_eq!(api.generation(), 1);
    }

    #[test]
    fn expansion_only_applies_to_folders() {
        let (mut api, ids) = make_api();
        api.set_expanded(&ids.id("A"), true).unwrap();
        assert!(api.is_expanded(&ids.id("A")));
        let writes = api.prefs().write_count();

        let err = api.set_expanded(&ids.id("x"), true).unwrap_err();
        assert!(matches!(err, BookmarkError::Api(_)));
        let err = api.toggle_folder(&"404".into()).unwrap_err();
        assert!(matches!(err, BookmarkError::NotFound(_)));

        assert!(!api.is_expanded(&ids.id("x")));
        assert_eq!(api.prefs().write_count(), writes);
    }

    #[test]
    fn reparent_rebuilds_exactly_once() {
        let (mut api, ids) = make_api();
        let res = api.reparent(&ids.id("x"), &ids.id("B")).unwrap();
        assert!(res.changed);
        assert_eq!(api.generation(), 2);
        assert_eq!(api.store().move_calls(), 1);

        let b = api.tree().find(ids.id("B").as_str()).unwrap();
        let titles: Vec<&str> = b.children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["y", "x"]);
    }

    #[test]
    fn skipped_reparent_neither_calls_store_nor_rebuilds() {
        let (mut api, ids) = make_api();
        let res = api.reparent(&ids.id("B"), &ids.id("B")).unwrap();
        assert_eq!(res.skipped, Some(SkipReason::SameNode));
        assert_eq!(api.generation(), 1);
        assert!(api.store().calls().is_empty());
    }

    #[test]
    fn rejected_reparent_keeps_the_tree() {
        let (mut api, ids) = make_api();
        let (a, b) = (ids.id("A"), ids.id("B"));
        let err = api.reparent(&a, &b).unwrap_err();
        assert!(matches!(err, BookmarkError::MutationFailure(_)));
        assert_eq!(api.generation(), 1);

        let ancestors: Vec<&str> = api
            .tree()
            .ancestors_of(b.as_str())
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ancestors, vec![a.as_str(), "1"]);
    }

    #[test]
    fn debounced_search_applies_latest_query() {
        let (mut api, ids) = make_api();
        let start = Instant::now();
        api.search_input("x", start);
        api.search_input("y", start + Duration::from_millis(100));
        assert!(!api.search_tick(start + Duration::from_millis(200)));
        assert!(api.search_tick(start + Duration::from_millis(400)));

        assert_eq!(api.query(), "y");
        assert!(!api.visibility().is_visible(&ids.id("x")));
        assert!(api.is_expanded(&ids.id("B")));
        assert!(!api.expansion().is_expanded(&ids.id("B")));
    }

    #[test]
    fn filter_survives_rebuilds() {
        let (mut api, ids) = make_api();
        api.set_query("y");
        api.rename(&ids.id("x"), Some("also y")).unwrap();
        assert!(api.visibility().is_visible(&ids.id("x")));
        let visible = api.visible_tree();
        assert!(visible.find(ids.id("x").as_str()).is_some());
    }

    #[test]
    fn folder_click_selects_and_toggles() {
        let (mut api, ids) = make_api();
        let mut ui = ScriptedInteraction::new();
        let b = ids.id("B");

        let out = api.click(&b, &mut ui).unwrap();
        assert!(matches!(out, ActionOutcome::FolderToggled { expanded: true, .. }));
        assert_eq!(api.session().selected_folder(), &b);

        api.create_folder("C").unwrap();
        let b_node = api.tree().find(b.as_str()).unwrap();
        assert_eq!(b_node.children.last().map(|n| n.title.as_str()), Some("C"));
    }

    #[test]
    fn bookmark_click_opens_and_bulk_mode_selects() {
        let (mut api, ids) = make_api();
        let mut ui = ScriptedInteraction::new();
        let y = ids.id("y");

        api.click(&y, &mut ui).unwrap();
        assert_eq!(ui.opened, vec!["http://y".to_string()]);

        api.toggle_bulk_mode();
        let out = api.click(&y, &mut ui).unwrap();
        assert!(matches!(out, ActionOutcome::Selection { selected: true, .. }));
        assert_eq!(ui.opened.len(), 1);
        api.toggle_bulk_mode();
        assert!(api.session().selection().is_empty());
    }

    #[test]
    fn context_delete_rebuilds_after_confirmation() {
        let (mut api, ids) = make_api();
        let mut ui = ScriptedInteraction::new().confirming(true);
        api.open_context_menu(&ids.id("A"));
        let out = api.run_action(ContextAction::Delete, &mut ui).unwrap();
        assert!(out.changed());
        assert_eq!(api.generation(), 2);
        assert!(api.tree().find(ids.id("y").as_str()).is_none());

        let err = api.run_action(ContextAction::Delete, &mut ui).unwrap_err();
        assert!(matches!(err, BookmarkError::Api(_)));
    }

    #[test]
    fn stats_and_export_go_through_the_store() {
        let (api, ids) = make_api();
        let stats = api.folder_stats(&ids.id("A")).unwrap();
        assert_eq!(stats.to_string(), "1 folder - 2 bookmarks");
        assert_eq!(api.collection_stats().unwrap().bookmarks, 2);

        let file = api.export(Some(&ids.id("B")), ExportFormat::Csv).unwrap();
        assert_eq!(file.content, "Title,URL,Folder\n\"y\",\"http://y\",\"B\"\n");
    }

    #[test]
    fn theme_toggles_and_persists() {
        let (mut api, _ids) = make_api();
        assert_eq!(api.theme().unwrap(), Theme::Light);
        assert_eq!(api.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(api.theme().unwrap(), Theme::Dark);

        api.set_scroll_position(120).unwrap();
        assert_eq!(api.scroll_position().unwrap(), Some(120));
    }
}
