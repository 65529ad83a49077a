//! The guide controller — single owner of interaction state.
//!
//! Each controller lives in its own module as an `impl` block on [`Guide`]:
//! tabs, timeline panels, decision tree, glossary, search and accessibility.
//! This module holds the shared plumbing: construction, click and text input
//! routing, deferred-action dispatch, notifications and persistence.

mod a11y;
mod decision;
mod glossary;
mod panels;
mod search;
mod tabs;

use std::time::Duration;

use tracing::{debug, warn};

use crate::builder::{self, ATTR_VALUE};
use crate::config::GuideConfig;
use crate::content::GuideContent;
use crate::error::{ContentError, StoreError};
use crate::notify::{NoticeLevel, Notifications};
use crate::registry::{Control, Registry};
use crate::sink::EventSink;
use crate::state::InteractionState;
use crate::store::BlobStore;
use crate::timers::{Deferred, TimerId, Timers};
use crate::tree::{MemoryTree, NodeId, PresentationTree};

pub use a11y::SHORTCUTS;
pub use search::{MatchKind, SearchMatch, CLASS_HIGHLIGHT};

/// Decision tree modal session.
#[derive(Debug, Default)]
struct ModalSession {
    open: bool,
    return_focus: Option<NodeId>,
}

pub struct Guide<T: PresentationTree> {
    tree: T,
    registry: Registry,
    state: InteractionState,
    config: GuideConfig,
    timers: Timers,
    notifications: Notifications,
    store: Box<dyn BlobStore>,
    sink: Box<dyn EventSink>,
    modal: ModalSession,
    highlight_timer: Option<TimerId>,
    announce_timer: Option<TimerId>,
}

impl Guide<MemoryTree> {
    /// Build the tree for `content` and wrap it in a guide.
    pub fn from_content(
        content: &GuideContent,
        config: GuideConfig,
        store: Box<dyn BlobStore>,
        sink: Box<dyn EventSink>,
    ) -> Result<Self, ContentError> {
        let (tree, registry) = builder::build(content)?;
        Ok(Self::new(tree, registry, config, store, sink))
    }
}

impl<T: PresentationTree> Guide<T> {
    /// Wrap an already-built tree. Installs the skip link and live region and
    /// applies the first tab.
    pub fn new(
        tree: T,
        registry: Registry,
        config: GuideConfig,
        store: Box<dyn BlobStore>,
        sink: Box<dyn EventSink>,
    ) -> Self {
        let mut guide = Self {
            tree,
            registry,
            state: InteractionState::default(),
            config,
            timers: Timers::new(),
            notifications: Notifications::new(),
            store,
            sink,
            modal: ModalSession::default(),
            highlight_timer: None,
            announce_timer: None,
        };
        guide.install_accessibility();
        if let Some(first) = guide.registry.tabs.first().map(|t| t.id) {
            guide.apply_tab(first);
        }
        guide
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.open
    }

    // ── Event routing ────────────────────────────────────────────────

    /// Route a click on `node` to the controller that owns it.
    pub fn click(&mut self, node: NodeId) {
        if self.modal.open && node == self.registry.modal.root {
            self.close_decision_tree();
            return;
        }
        let Some(control) = self.registry.control(node).cloned() else {
            return;
        };
        debug!(?node, ?control, "click");
        match control {
            Control::Tab(tab) => self.switch_tab(tab),
            Control::PanelTrigger(panel) => self.toggle_detail_panel(&panel),
            Control::OpenDecisionTree => self.open_decision_tree(node),
            Control::CloseDecisionTree => self.close_decision_tree(),
            Control::DecisionBack => self.go_back(),
            Control::Choice(target) => self.handle_choice(&target),
            Control::GlossaryToggle => self.toggle_glossary(),
            Control::SearchSubmit => {
                let query = self.field_value(self.registry.search_field);
                self.perform_search(&query);
            }
            Control::SkipLink => self.follow_skip_link(),
        }
    }

    /// Enter on the focused node: submit a search field, otherwise click.
    pub fn activate_focused(&mut self) {
        let Some(node) = self.tree.focused() else {
            return;
        };
        if node == self.registry.search_field {
            let query = self.field_value(node);
            self.perform_search(&query);
        } else {
            self.click(node);
        }
    }

    /// Replace the value of a text field. The glossary field filters as
    /// the user types.
    pub fn input(&mut self, node: NodeId, value: &str) {
        if !self.registry.is_text_field(node) {
            return;
        }
        self.tree.set_attr(node, ATTR_VALUE, value);
        if node == self.registry.glossary.search_field {
            self.filter_glossary(value);
        }
    }

    pub fn field_value(&self, node: NodeId) -> String {
        self.tree.attr(node, ATTR_VALUE).unwrap_or_default()
    }

    // ── Deferred actions ─────────────────────────────────────────────

    /// Advance the virtual clock and run every action that fell due.
    pub fn tick(&mut self, now: Duration) {
        for action in self.timers.advance(now) {
            self.run_deferred(action);
        }
    }

    fn run_deferred(&mut self, action: Deferred) {
        match action {
            Deferred::ScrollIntoView { node, align } => {
                self.tree.scroll_into_view(node, align);
            }
            Deferred::Focus(node) => {
                self.tree.focus(node);
            }
            Deferred::ClearHighlights => {
                self.highlight_timer = None;
                self.clear_highlights();
            }
            Deferred::DismissNotification(id) => {
                self.notifications.dismiss(id);
            }
            Deferred::ClearAnnouncement => {
                self.announce_timer = None;
                if let Some(region) = self.registry.live_region {
                    self.tree.set_text(region, "");
                }
            }
        }
    }

    // ── Notifications ────────────────────────────────────────────────

    /// Show a transient notification that dismisses itself.
    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let id = self.notifications.push(level, message);
        self.timers.schedule(
            self.config.notification_duration(),
            Deferred::DismissNotification(id),
        );
        id
    }

    /// Show a notice that stays until acknowledged.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.notifications.block(message);
    }

    pub fn acknowledge_alert(&mut self) -> Option<String> {
        self.notifications.acknowledge()
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Save interaction state. Failures are logged, never raised.
    pub fn save_state(&mut self) {
        if let Err(e) = self.try_save() {
            warn!(error = %e, "could not save interaction state; continuing in memory");
        }
    }

    fn try_save(&mut self) -> Result<(), StoreError> {
        // Pretty-printed for human readability
        let json = serde_json::to_string_pretty(&self.state)?;
        self.store.set(&self.config.storage_key, &json)
    }

    /// Load saved interaction state and re-apply it to the tree. Failures
    /// are logged and leave the current state untouched.
    pub fn load_state(&mut self) {
        match self.try_load() {
            Ok(Some(saved)) => self.restore(saved),
            Ok(None) => debug!("no saved interaction state"),
            Err(e) => warn!(error = %e, "could not load interaction state; using defaults"),
        }
    }

    fn try_load(&self) -> Result<Option<InteractionState>, StoreError> {
        match self.store.get(&self.config.storage_key)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    fn restore(&mut self, saved: InteractionState) {
        if self.registry.tab(saved.active_tab).is_some() {
            self.apply_tab(saved.active_tab);
        }
        for panel in &saved.expanded_panels {
            if self.registry.stage(panel).is_some() && !self.state.is_expanded(panel) {
                self.toggle_detail_panel(panel);
            }
        }
        if saved.glossary_open != self.state.glossary_open {
            self.toggle_glossary();
        }
        self.state.decision_tree_step = saved.decision_tree_step;
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::sink::RecordingSink;
    use crate::state::{PanelId, StepId, TabId};
    use crate::store::MemoryStore;

    #[test]
    fn click_routes_tab_controls() {
        let mut guide = sample_guide();
        let developer = guide.registry().tab(TabId::Developer).unwrap().control;
        guide.click(developer);
        assert_eq!(guide.state().active_tab, TabId::Developer);
    }

    #[test]
    fn click_on_unregistered_node_is_ignored() {
        let mut guide = sample_guide();
        let before = guide.state().clone();
        let main = guide.registry().main_content;
        guide.click(main);
        assert_eq!(guide.state(), &before);
    }

    #[test]
    fn notifications_dismiss_themselves() {
        let mut guide = sample_guide();
        guide.notify(NoticeLevel::Info, "hello");
        assert_eq!(guide.notifications().len(), 1);
        guide.tick(Duration::from_millis(2_999));
        assert_eq!(guide.notifications().len(), 1);
        guide.tick(Duration::from_millis(3_000));
        assert!(guide.notifications().is_empty());
    }

    #[test]
    fn input_only_touches_text_fields() {
        let mut guide = sample_guide();
        let field = guide.registry().search_field;
        guide.input(field, "hearing");
        assert_eq!(guide.field_value(field), "hearing");

        let main = guide.registry().main_content;
        guide.input(main, "x");
        assert_eq!(guide.tree().attr(main, ATTR_VALUE), None);
    }

    #[test]
    fn save_then_load_restores_state() {
        let store = MemoryStore::new();
        let mut guide = sample_guide_with(store, RecordingSink::new());
        guide.switch_tab(TabId::Official);
        guide.toggle_detail_panel(&PanelId::new("notice"));
        guide.toggle_glossary();
        guide.save_state();
        let blob = guide
            .store
            .get("rezoning-guide-state")
            .unwrap()
            .expect("state saved");

        let mut fresh = sample_guide_with(
            MemoryStore::new().with_blob("rezoning-guide-state", &blob),
            RecordingSink::new(),
        );
        fresh.load_state();
        assert_eq!(fresh.state().active_tab, TabId::Official);
        assert_eq!(fresh.state().expanded_panels, vec![PanelId::new("notice")]);
        assert!(fresh.state().glossary_open);
        let notice = fresh.registry().stage(&PanelId::new("notice")).unwrap().content;
        assert!(fresh.tree().is_visible(notice));
    }

    #[test]
    fn unavailable_store_is_not_fatal() {
        let mut guide = sample_guide_with(MemoryStore::unavailable(), RecordingSink::new());
        guide.switch_tab(TabId::Developer);
        guide.save_state();
        guide.load_state();
        assert_eq!(guide.state().active_tab, TabId::Developer);
    }

    #[test]
    fn corrupt_blob_is_ignored() {
        let store = MemoryStore::new().with_blob("rezoning-guide-state", "not json {{{");
        let mut guide = sample_guide_with(store, RecordingSink::new());
        guide.load_state();
        assert_eq!(guide.state(), &InteractionState::default());
    }

    #[test]
    fn restore_does_not_track_navigation() {
        let sink = RecordingSink::new();
        let store = MemoryStore::new().with_blob(
            "rezoning-guide-state",
            r#"{"active_tab":"developer","decision_tree_step":2}"#,
        );
        let mut guide = sample_guide_with(store, sink.clone());
        guide.load_state();
        assert_eq!(guide.state().active_tab, TabId::Developer);
        assert_eq!(guide.state().decision_tree_step, StepId(2));
        assert!(sink.events().is_empty());
    }
}
