//! End-to-end interaction flows against the bundled sample guide.
//!
//! Tests:
//! 1. Every tab switch leaves one tab selected, one panel shown, no panels open
//! 2. Resident view dims stages without community influence
//! 3. Glossary filtering: empty shows all, miss hides all, case-insensitive
//! 4. Search edge cases: empty query, single detail hit, no hit
//! 5. Decision tree: restart at step 1, back navigation, choice transitions
//! 6. Keyboard: shortcuts, tab arrows, Escape
//! 7. Persistence round trip through a file store

use std::time::Duration;

use rezoning_core::builder::{ATTR_SELECTED, CLASS_CHOICE};
use rezoning_core::{
    FileStore, Guide, GuideConfig, GuideContent, Key, KeyOutcome, KeyPress, MatchKind,
    MemoryStore, MemoryTree, NoticeLevel, NodeId, PanelId, PresentationTree, RecordingSink,
    ResultId, StepId, TabId,
};

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn guide_with(store: MemoryStore, sink: RecordingSink) -> Guide<MemoryTree> {
    let content = GuideContent::sample().unwrap();
    Guide::from_content(&content, GuideConfig::default(), Box::new(store), Box::new(sink)).unwrap()
}

fn guide() -> Guide<MemoryTree> {
    guide_with(MemoryStore::new(), RecordingSink::new())
}

fn visible_decision_nodes(guide: &Guide<MemoryTree>) -> Vec<NodeId> {
    guide
        .registry()
        .decision_nodes()
        .filter(|&n| guide.tree().is_visible(n))
        .collect()
}

/// Choice buttons of the question currently on screen.
fn choice_buttons(guide: &Guide<MemoryTree>, step: StepId) -> Vec<NodeId> {
    let question = guide.registry().question(step).unwrap().node;
    guide
        .tree()
        .descendants(question)
        .into_iter()
        .filter(|&n| guide.tree().has_class(n, CLASS_CHOICE))
        .collect()
}

fn visible_glossary_count(guide: &Guide<MemoryTree>) -> usize {
    guide
        .registry()
        .glossary
        .entries
        .iter()
        .filter(|&&n| guide.tree().is_visible(n))
        .count()
}

// ──────────────────────────────────────────────
// Tabs
// ──────────────────────────────────────────────

#[test]
fn every_tab_switch_shows_exactly_one_view() {
    let mut guide = guide();
    guide.toggle_detail_panel(&PanelId::new("notice"));

    for tab in TabId::ALL {
        guide.switch_tab(tab);
        let tree = guide.tree();
        let handles = &guide.registry().tabs;

        let selected: Vec<_> = handles
            .iter()
            .filter(|h| tree.attr(h.control, ATTR_SELECTED).as_deref() == Some("true"))
            .map(|h| h.id)
            .collect();
        assert_eq!(selected, vec![tab]);

        let shown: Vec<_> = handles.iter().filter(|h| tree.is_visible(h.panel)).map(|h| h.id).collect();
        assert_eq!(shown, vec![tab]);
        assert!(guide.state().expanded_panels.is_empty());
    }
}

#[test]
fn resident_view_dims_stages_without_influence() {
    let mut guide = guide();
    guide.switch_tab(TabId::Resident);
    let dimmed = guide.config().deemphasis_opacity;

    for stage in &guide.registry().stages {
        let influence = guide.tree().has_class(stage.item, "has-influence");
        let expected = if influence { 1.0 } else { dimmed };
        assert_eq!(guide.tree().opacity(stage.item), Some(expected), "{}", stage.panel);
    }

    guide.switch_tab(TabId::Official);
    for stage in &guide.registry().stages {
        assert_eq!(guide.tree().opacity(stage.item), Some(1.0));
    }
}

#[test]
fn tab_clicks_are_tracked() {
    let sink = RecordingSink::new();
    let mut guide = guide_with(MemoryStore::new(), sink.clone());
    let control = guide.registry().tab(TabId::Official).unwrap().control;
    guide.click(control);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category, "navigation");
    assert_eq!(events[0].action, "tab_switch");
    assert_eq!(events[0].label, "official");
}

// ──────────────────────────────────────────────
// Glossary
// ──────────────────────────────────────────────

#[test]
fn glossary_filter_contract() {
    let mut guide = guide();
    let total = guide.registry().glossary.entries.len();

    guide.filter_glossary("");
    assert_eq!(visible_glossary_count(&guide), total);

    guide.filter_glossary("no such term anywhere");
    assert_eq!(visible_glossary_count(&guide), 0);

    guide.filter_glossary("SETBACK");
    let shouted = visible_glossary_count(&guide);
    guide.filter_glossary("setback");
    assert_eq!(visible_glossary_count(&guide), shouted);
    assert_eq!(shouted, 1);
}

// ──────────────────────────────────────────────
// Search
// ──────────────────────────────────────────────

#[test]
fn empty_search_is_a_blocking_notice_only() {
    let mut guide = guide();
    assert!(guide.perform_search("").is_empty());
    assert!(guide.highlighted().is_empty());
    assert!(guide.notifications().is_empty());
    assert_eq!(guide.notifications().blocking(), Some("Please enter a search term"));
    assert_eq!(guide.acknowledge_alert().as_deref(), Some("Please enter a search term"));
    assert_eq!(guide.notifications().blocking(), None);
}

#[test]
fn single_detail_hit_opens_its_panel() {
    let mut guide = guide();
    let matches = guide.perform_search("arborist");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, MatchKind::Detail);

    let panel = PanelId::new("staff-review");
    assert!(guide.is_panel_expanded(&panel));
    let content = guide.registry().stage(&panel).unwrap().content;
    assert_eq!(matches[0].target, content);
    assert!(guide.tree().is_visible(content));
    assert_eq!(guide.notifications().latest().unwrap().message, "Found 1 result");
}

#[test]
fn missing_term_warns_and_highlights_nothing() {
    let mut guide = guide();
    assert!(!guide.perform_search("council").is_empty());
    assert!(guide.perform_search("density").is_empty());
    assert!(guide.highlighted().is_empty());
    let note = guide.notifications().latest().unwrap();
    assert_eq!(note.level, NoticeLevel::Warning);
}

#[test]
fn search_button_reads_the_search_field() {
    let mut guide = guide();
    let field = guide.registry().search_field;
    let button = guide.registry().search_button;
    guide.input(field, "arborist");
    guide.click(button);
    assert!(guide.is_panel_expanded(&PanelId::new("staff-review")));

    guide.tick(Duration::from_secs(5));
    assert!(guide.highlighted().is_empty());
}

// ──────────────────────────────────────────────
// Decision tree
// ──────────────────────────────────────────────

#[test]
fn decision_tree_walk() {
    let mut guide = guide();
    let opener = guide.registry().modal.opener;
    guide.click(opener);
    assert_eq!(guide.state().decision_tree_step, StepId(1));

    // Step 1, first choice leads to step 2.
    let first = choice_buttons(&guide, StepId(1))[0];
    guide.click(first);
    let step2 = guide.registry().question(StepId(2)).unwrap().node;
    assert_eq!(visible_decision_nodes(&guide), vec![step2]);

    // Back returns to step 1 with only that question showing.
    let back = guide.registry().modal.back;
    guide.click(back);
    let step1 = guide.registry().question(StepId(1)).unwrap().node;
    assert_eq!(visible_decision_nodes(&guide), vec![step1]);

    // Step 1, second choice ends at the rezoning result.
    let second = choice_buttons(&guide, StepId(1))[1];
    guide.click(second);
    let result = guide
        .registry()
        .result(&ResultId::new("rezoning-required"))
        .unwrap()
        .node;
    assert_eq!(visible_decision_nodes(&guide), vec![result]);

    // Closing and reopening starts over.
    let close = guide.registry().modal.close;
    guide.click(close);
    guide.click(opener);
    assert_eq!(visible_decision_nodes(&guide), vec![step1]);
}

// ──────────────────────────────────────────────
// Keyboard
// ──────────────────────────────────────────────

#[test]
fn arrow_keys_cycle_tabs_from_focused_control() {
    let mut guide = guide();
    let first = guide.registry().tabs[0].control;
    guide.focus_node(first);

    assert_eq!(guide.handle_key(KeyPress::new(Key::Left)), KeyOutcome::Consumed);
    assert_eq!(guide.state().active_tab, TabId::Official);
    guide.handle_key(KeyPress::new(Key::Home));
    assert_eq!(guide.state().active_tab, TabId::Resident);
    guide.handle_key(KeyPress::new(Key::Right));
    assert_eq!(guide.state().active_tab, TabId::Developer);
}

#[test]
fn arrows_outside_the_tab_list_are_ignored() {
    let mut guide = guide();
    let main = guide.registry().main_content;
    guide.focus_node(main);
    assert_eq!(guide.handle_key(KeyPress::new(Key::Right)), KeyOutcome::Ignored);
    assert_eq!(guide.state().active_tab, TabId::Resident);
}

#[test]
fn glossary_shortcut_then_escape() {
    let mut guide = guide();
    guide.handle_key(KeyPress::ctrl(Key::Char('g')));
    guide.tick(Duration::from_millis(100));
    assert_eq!(guide.tree().focused(), Some(guide.registry().glossary.search_field));

    guide.handle_key(KeyPress::new(Key::Escape));
    assert!(!guide.state().glossary_open);
    assert_eq!(guide.tree().focused(), Some(guide.registry().glossary.toggle));
}

// ──────────────────────────────────────────────
// Persistence
// ──────────────────────────────────────────────

#[test]
fn state_survives_a_restart_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let content = GuideContent::sample().unwrap();

    let mut first = Guide::from_content(
        &content,
        GuideConfig::default(),
        Box::new(FileStore::new(dir.path())),
        Box::new(RecordingSink::new()),
    )
    .unwrap();
    first.switch_tab(TabId::Developer);
    first.toggle_detail_panel(&PanelId::new("council-vote"));
    first.save_state();

    let saved = std::fs::read_to_string(dir.path().join("rezoning-guide-state.json")).unwrap();
    assert!(saved.contains("\n  \"active_tab\": \"developer\""));

    let mut second = Guide::from_content(
        &content,
        GuideConfig::default(),
        Box::new(FileStore::new(dir.path())),
        Box::new(RecordingSink::new()),
    )
    .unwrap();
    second.load_state();
    assert_eq!(second.state().active_tab, TabId::Developer);
    assert_eq!(second.state().expanded_panels, vec![PanelId::new("council-vote")]);
    assert!(!second.is_modal_open());
}
