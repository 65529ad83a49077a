//! Tab controller — audience view switching and tab-list keyboard contract.

use crate::builder::{ATTR_SELECTED, CLASS_HAS_INFLUENCE};
use crate::keys::Key;
use crate::state::TabId;
use crate::tree::PresentationTree;

use super::Guide;

impl<T: PresentationTree> Guide<T> {
    /// Make `tab` the active view, collapse every open detail panel, and
    /// re-apply the tab's de-emphasis rule. Tracks a navigation event.
    pub fn switch_tab(&mut self, tab: TabId) {
        self.apply_tab(tab);
        self.sink.track_event("navigation", "tab_switch", tab.as_str());
    }

    /// `switch_tab` without tracking. Used at startup and when restoring.
    pub(super) fn apply_tab(&mut self, tab: TabId) {
        self.state.active_tab = tab;

        let panel_identity = tab.panel_identity();
        for handle in &self.registry.tabs {
            let selected = handle.id == tab;
            self.tree
                .set_attr(handle.control, ATTR_SELECTED, if selected { "true" } else { "false" });
            let matches = self.tree.identity(handle.panel).as_deref() == Some(panel_identity.as_str());
            self.tree.set_visible(handle.panel, matches);
        }

        self.collapse_all_panels();

        let dimmed = self.config.deemphasis_opacity;
        for stage in &self.registry.stages {
            let opacity = if tab == TabId::Resident && !self.tree.has_class(stage.item, CLASS_HAS_INFLUENCE) {
                dimmed
            } else {
                1.0
            };
            self.tree.set_opacity(stage.item, opacity);
        }
    }

    /// Arrow/Home/End navigation while a tab control has focus. Moves focus
    /// and activates immediately. Returns false if the key does not apply.
    pub(super) fn navigate_tabs(&mut self, key: Key) -> bool {
        let Some(current) = self
            .tree
            .focused()
            .and_then(|node| self.registry.tab_index_of_control(node))
        else {
            return false;
        };
        let count = self.registry.tabs.len();
        let target = match key {
            Key::Right => (current + 1) % count,
            Key::Left => (current + count - 1) % count,
            Key::Home => 0,
            Key::End => count - 1,
            _ => return false,
        };
        let handle = &self.registry.tabs[target];
        let (control, id) = (handle.control, handle.id);
        self.tree.focus(control);
        self.switch_tab(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::ATTR_SELECTED;
    use crate::guide::test_support::*;
    use crate::keys::{Key, KeyPress};
    use crate::sink::{RecordingSink, TrackedEvent};
    use crate::state::{PanelId, TabId};
    use crate::store::MemoryStore;
    use crate::tree::PresentationTree;

    #[test]
    fn switch_selects_exactly_one_tab_and_panel() {
        let mut guide = sample_guide();
        for tab in TabId::ALL {
            guide.toggle_detail_panel(&PanelId::new("notice"));
            guide.switch_tab(tab);

            let tree = guide.tree();
            let selected: Vec<_> = guide
                .registry()
                .tabs
                .iter()
                .filter(|t| tree.attr(t.control, ATTR_SELECTED).as_deref() == Some("true"))
                .map(|t| t.id)
                .collect();
            assert_eq!(selected, vec![tab]);

            let visible: Vec<_> = guide
                .registry()
                .tabs
                .iter()
                .filter(|t| tree.is_visible(t.panel))
                .map(|t| t.id)
                .collect();
            assert_eq!(visible, vec![tab]);
            assert!(guide.state().expanded_panels.is_empty());
        }
    }

    #[test]
    fn resident_tab_dims_stages_without_influence() {
        let mut guide = sample_guide();
        guide.switch_tab(TabId::Resident);
        let tree = guide.tree();
        for stage in &guide.registry().stages {
            let expected = if tree.has_class(stage.item, "has-influence") { 1.0 } else { 0.5 };
            assert_eq!(tree.opacity(stage.item), Some(expected), "{}", stage.panel);
        }

        guide.switch_tab(TabId::Developer);
        let tree = guide.tree();
        assert!(guide
            .registry()
            .stages
            .iter()
            .all(|s| tree.opacity(s.item) == Some(1.0)));
    }

    #[test]
    fn switch_tracks_navigation_event() {
        let sink = RecordingSink::new();
        let mut guide = sample_guide_with(MemoryStore::new(), sink.clone());
        guide.switch_tab(TabId::Official);
        assert_eq!(
            sink.events(),
            vec![TrackedEvent {
                category: "navigation".into(),
                action: "tab_switch".into(),
                label: "official".into(),
            }]
        );
    }

    #[test]
    fn switching_to_active_tab_is_idempotent() {
        let mut guide = sample_guide();
        guide.switch_tab(TabId::Resident);
        guide.switch_tab(TabId::Resident);
        assert_eq!(guide.state().active_tab, TabId::Resident);
        assert!(guide.state().expanded_panels.is_empty());
    }

    #[test]
    fn arrow_keys_wrap_and_activate() {
        let mut guide = sample_guide();
        let first = guide.registry().tabs[0].control;
        guide.focus_node(first);

        guide.handle_key(KeyPress::new(Key::Left));
        assert_eq!(guide.state().active_tab, TabId::Official);
        assert_eq!(guide.tree().focused(), Some(guide.registry().tabs[2].control));

        guide.handle_key(KeyPress::new(Key::Right));
        assert_eq!(guide.state().active_tab, TabId::Resident);

        guide.handle_key(KeyPress::new(Key::End));
        assert_eq!(guide.state().active_tab, TabId::Official);
        guide.handle_key(KeyPress::new(Key::Home));
        assert_eq!(guide.state().active_tab, TabId::Resident);
    }

    #[test]
    fn arrow_keys_ignored_off_the_tab_list() {
        let mut guide = sample_guide();
        let field = guide.registry().search_field;
        guide.focus_node(field);
        assert!(!guide.handle_key(KeyPress::new(Key::Right)).is_consumed());
        assert_eq!(guide.state().active_tab, TabId::Resident);
    }
}
