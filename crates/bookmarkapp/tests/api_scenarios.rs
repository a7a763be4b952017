use bookmarkapp::api::BookmarksApi;
use bookmarkapp::commands::export::ExportFormat;
use bookmarkapp::commands::SkipReason;
use bookmarkapp::config::BookmarksConfig;
use bookmarkapp::dispatch::{ActionOutcome, ContextAction, Interaction};
use bookmarkapp::error::Result;
use bookmarkapp::model::{NodeId, StoreNode};
use bookmarkapp::prefs::FilePrefs;
use bookmarkapp::store::fs::FileStore;
use bookmarkapp::tree::annotate;
use tempfile::TempDir;

/// Answers every prompt with `answer` and every confirmation with `yes`.
struct Canned {
    answer: Option<String>,
    yes: bool,
    opened: Vec<String>,
}

impl Canned {
    fn new(answer: Option<&str>, yes: bool) -> Self {
        Self {
            answer: answer.map(str::to_string),
            yes,
            opened: Vec::new(),
        }
    }
}

impl Interaction for Canned {
    fn prompt(&mut self, _message: &str, _initial: &str) -> Option<String> {
        self.answer.clone()
    }

    fn confirm(&mut self, _message: &str) -> bool {
        self.yes
    }

    fn open_url(&mut self, url: &str) -> Result<()> {
        self.opened.push(url.to_string());
        Ok(())
    }
}

fn open_api(dir: &TempDir) -> BookmarksApi<FileStore, FilePrefs> {
    let root = dir.path().to_path_buf();
    let mut api = BookmarksApi::new(
        FileStore::new(root.clone()),
        FilePrefs::new(root),
        BookmarksConfig::default(),
    )
    .unwrap();
    api.load().unwrap();
    api
}

/// `Bookmarks bar/A [x, B [y]]`, returning the ids of A, x, B and y.
fn build_scenario(api: &mut BookmarksApi<FileStore, FilePrefs>) -> [NodeId; 4] {
    let a = api.create_folder("A").unwrap().affected[0].id.clone();
    api.select_folder(&a);
    let x = api.save_bookmark("x", "http://x").unwrap().affected[0].id.clone();
    let b = api.create_folder("B").unwrap().affected[0].id.clone();
    api.select_folder(&b);
    let y = api.save_bookmark("y", "http://y").unwrap().affected[0].id.clone();
    [a, x, b, y]
}

#[test]
fn test_first_run_expansion_persists_across_sessions() {
    let dir = TempDir::new().unwrap();
    {
        let api = open_api(&dir);
        assert!(api.is_expanded(&"1".into()));
        assert!(api.is_expanded(&"2".into()));
    }

    let mut api = open_api(&dir);
    api.set_expanded(&"2".into(), false).unwrap();
    let api = open_api(&dir);
    assert!(api.is_expanded(&"1".into()));
    assert!(!api.is_expanded(&"2".into()));
}

#[test]
fn test_search_then_export_folder() {
    let dir = TempDir::new().unwrap();
    let mut api = open_api(&dir);
    let [a, x, b, y] = build_scenario(&mut api);

    api.set_query("Y");
    let vis = api.visibility();
    for id in [&a, &b, &y] {
        assert!(vis.is_visible(id));
    }
    assert!(!vis.is_visible(&x));

    let csv = api.export(Some(&a), ExportFormat::Csv).unwrap();
    assert_eq!(
        csv.content,
        "Title,URL,Folder\n\"x\",\"http://x\",\"A\"\n\"y\",\"http://y\",\"A/B\"\n"
    );

    let json = api.export(Some(&a), ExportFormat::Json).unwrap();
    let parsed: StoreNode = serde_json::from_str(&json.content).unwrap();
    let original = api.tree().find(a.as_str()).unwrap();
    assert!(annotate(parsed, 1).same_shape(original));
}

#[test]
fn test_cycle_is_rejected_and_nothing_moves() {
    let dir = TempDir::new().unwrap();
    let mut api = open_api(&dir);
    let [a, _x, b, _y] = build_scenario(&mut api);
    let before = api.generation();

    assert!(api.reparent(&a, &b).is_err());
    assert_eq!(api.generation(), before);

    let reopened = open_api(&dir);
    let parents: Vec<&str> = reopened
        .tree()
        .ancestors_of(b.as_str())
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(parents, vec![a.as_str(), "1"]);
}

#[test]
fn test_protected_roots_cannot_be_moved_renamed_or_deleted() {
    let dir = TempDir::new().unwrap();
    let mut api = open_api(&dir);
    let [a, ..] = build_scenario(&mut api);

    assert!(!api.can_drag(&"1".into()));
    let res = api.reparent(&a, &"0".into()).unwrap();
    assert_eq!(res.skipped, Some(SkipReason::Protected("0".into())));

    let mut ui = Canned::new(Some("Renamed"), true);
    for action in [ContextAction::Rename, ContextAction::Delete] {
        api.open_context_menu(&"2".into());
        let out = api.run_action(action, &mut ui).unwrap();
        assert!(!out.changed());
    }
    let titles: Vec<&str> = api.tree().roots.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Bookmarks bar", "Other bookmarks"]);
}

#[test]
fn test_context_actions_use_the_captured_target() {
    let dir = TempDir::new().unwrap();
    let mut api = open_api(&dir);
    let [_a, x, b, y] = build_scenario(&mut api);

    let mut ui = Canned::new(Some("Beta"), true);
    api.open_context_menu(&b);
    api.select_folder(&"2".into());
    api.run_action(ContextAction::Rename, &mut ui).unwrap();
    assert_eq!(api.tree().find(b.as_str()).unwrap().title, "Beta");

    api.open_context_menu(&y);
    api.run_action(ContextAction::Open, &mut ui).unwrap();
    assert_eq!(ui.opened, vec!["http://y".to_string()]);

    api.open_context_menu(&x);
    let out = api.run_action(ContextAction::Export, &mut ui).unwrap();
    assert!(matches!(out, ActionOutcome::ChooseExport { target } if target == x));

    let mut cancel = Canned::new(None, false);
    api.open_context_menu(&b);
    let out = api.run_action(ContextAction::Rename, &mut cancel).unwrap();
    assert_eq!(
        out.command().and_then(|r| r.skipped.clone()),
        Some(SkipReason::Cancelled)
    );
}
