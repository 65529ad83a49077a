//! Timeline panel controller — expand/collapse of detail panels.
//!
//! `expanded_panels` is the source of truth; the trigger's `aria-expanded`
//! attribute and the content node's visibility mirror it after every call.

use tracing::debug;

use crate::builder::ATTR_EXPANDED;
use crate::state::PanelId;
use crate::timers::Deferred;
use crate::tree::{PresentationTree, ScrollAlign};

use super::Guide;

impl<T: PresentationTree> Guide<T> {
    /// Open a collapsed panel or close an open one. Opening schedules a
    /// scroll into view once layout has settled. Unknown panels are skipped.
    pub fn toggle_detail_panel(&mut self, panel: &PanelId) {
        self.toggle_panel(panel, true);
    }

    pub(super) fn toggle_panel(&mut self, panel: &PanelId, scroll_on_open: bool) {
        let Some(stage) = self.registry.stage(panel) else {
            debug!(%panel, "toggle on unknown panel skipped");
            return;
        };
        let (trigger, content) = (stage.trigger, stage.content);
        if !self.tree.contains(trigger) || !self.tree.contains(content) {
            debug!(%panel, "toggle on removed panel skipped");
            return;
        }

        let expanded = self.tree.attr(trigger, ATTR_EXPANDED).as_deref() == Some("true");
        if expanded {
            self.tree.set_visible(content, false);
            self.tree.set_attr(trigger, ATTR_EXPANDED, "false");
            self.state.mark_collapsed(panel);
        } else {
            self.tree.set_visible(content, true);
            self.tree.set_attr(trigger, ATTR_EXPANDED, "true");
            self.state.mark_expanded(panel.clone());
            if !scroll_on_open {
                return;
            }
            self.timers.schedule(
                self.config.scroll_delay(),
                Deferred::ScrollIntoView {
                    node: content,
                    align: ScrollAlign::Start,
                },
            );
        }
    }

    /// Close every open panel. Panels whose nodes are gone are skipped.
    pub fn collapse_all_panels(&mut self) {
        for panel in std::mem::take(&mut self.state.expanded_panels) {
            let Some(stage) = self.registry.stage(&panel) else {
                continue;
            };
            self.tree.set_visible(stage.content, false);
            self.tree.set_attr(stage.trigger, ATTR_EXPANDED, "false");
        }
    }

    pub fn is_panel_expanded(&self, panel: &PanelId) -> bool {
        self.state.is_expanded(panel)
    }
}
