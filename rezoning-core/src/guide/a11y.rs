//! Accessibility layer — global shortcuts, skip link, focus traversal and
//! live-region announcements.

use tracing::debug;

use crate::keys::{Key, KeyOutcome, KeyPress};
use crate::registry::Control;
use crate::timers::Deferred;
use crate::tree::{NodeSpec, PresentationTree};

use super::Guide;

/// Shortcut summary shown by Ctrl/Cmd+/.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("Ctrl/Cmd+K", "Focus search"),
    ("Ctrl/Cmd+G", "Toggle glossary"),
    ("Ctrl/Cmd+/", "Show keyboard shortcuts"),
    ("Escape", "Close dialog or glossary"),
    ("Left/Right, Home/End", "Move between tabs"),
];

impl<T: PresentationTree> Guide<T> {
    /// Insert the skip link as the first focusable element and create the
    /// live region. Runs once, from construction.
    pub(super) fn install_accessibility(&mut self) {
        let root = self.tree.root();
        if self.registry.skip_link.is_none() {
            let target = self
                .tree
                .identity(self.registry.main_content)
                .unwrap_or_else(|| "main-content".to_string());
            let spec = NodeSpec::new()
                .identity("skip-link")
                .class("skip-link")
                .class("visually-hidden")
                .attr("href", format!("#{target}"))
                .text("Skip to main content")
                .focusable();
            if let Some(link) = self.tree.insert(root, 0, spec) {
                self.registry.skip_link = Some(link);
                self.registry.register_control(link, Control::SkipLink);
            }
        }
        if self.registry.live_region.is_none() {
            let spec = NodeSpec::new()
                .identity("live-region")
                .class("visually-hidden")
                .attr("aria-live", "polite")
                .attr("aria-atomic", "true");
            self.registry.live_region = self.tree.insert(root, usize::MAX, spec);
        }
    }

    pub(super) fn follow_skip_link(&mut self) {
        self.tree.focus(self.registry.main_content);
    }

    /// Global key router. Returns [`KeyOutcome::Consumed`] when the host
    /// should suppress its default handling.
    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        if press.is_command() {
            match press.key {
                Key::Char('k') | Key::Char('K') => {
                    self.tree.focus(self.registry.search_field);
                    return KeyOutcome::Consumed;
                }
                Key::Char('g') | Key::Char('G') => {
                    self.toggle_glossary();
                    return KeyOutcome::Consumed;
                }
                Key::Char('/') => {
                    self.show_shortcuts();
                    return KeyOutcome::Consumed;
                }
                _ => {}
            }
        }

        match press.key {
            Key::Escape => {
                // The modal and the glossary listen independently; one
                // Escape can close both.
                let mut handled = false;
                if self.modal.open {
                    self.close_decision_tree();
                    handled = true;
                }
                if self.state.glossary_open {
                    self.toggle_glossary();
                    handled = true;
                }
                if handled {
                    KeyOutcome::Consumed
                } else {
                    KeyOutcome::Ignored
                }
            }
            Key::Left | Key::Right | Key::Home | Key::End if !press.is_command() => {
                if self.navigate_tabs(press.key) {
                    KeyOutcome::Consumed
                } else {
                    KeyOutcome::Ignored
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Blocking summary of the keyboard shortcuts.
    pub fn show_shortcuts(&mut self) {
        let lines: Vec<String> = SHORTCUTS
            .iter()
            .map(|(keys, action)| format!("{keys}: {action}"))
            .collect();
        self.alert(format!("Keyboard shortcuts\n{}", lines.join("\n")));
    }

    /// Put `message` in the live region and clear it again shortly after.
    pub fn announce(&mut self, message: &str) {
        let Some(region) = self.registry.live_region else {
            return;
        };
        self.tree.set_text(region, message);
        if let Some(previous) = self.announce_timer.take() {
            self.timers.cancel(previous);
        }
        self.announce_timer = Some(
            self.timers
                .schedule(self.config.announce_clear_delay(), Deferred::ClearAnnouncement),
        );
    }

    /// Text currently in the live region.
    pub fn announcement(&self) -> String {
        self.registry
            .live_region
            .and_then(|r| self.tree.text(r))
            .unwrap_or_default()
    }

    pub fn focus_node(&mut self, node: crate::tree::NodeId) -> bool {
        self.tree.focus(node)
    }

    /// Move focus to the next rendered focusable node, wrapping.
    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    /// Move focus to the previous rendered focusable node, wrapping.
    pub fn focus_prev(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        let order = self.focus_scope();
        if order.is_empty() {
            return;
        }
        let current = self
            .tree
            .focused()
            .and_then(|f| order.iter().position(|&n| n == f));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => order.len() - 1,
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
        };
        debug!(node = ?order[next], "focus moved");
        self.tree.focus(order[next]);
    }

    /// Focusable nodes reachable right now. An open modal traps focus, then
    /// an open glossary does.
    fn focus_scope(&self) -> Vec<crate::tree::NodeId> {
        let order = self.tree.focus_order();
        let scope = if self.modal.open {
            Some(self.registry.modal.root)
        } else if self.state.glossary_open {
            Some(self.registry.glossary.overlay)
        } else {
            None
        };
        match scope {
            Some(container) => order
                .into_iter()
                .filter(|&n| self.tree.descendants(container).contains(&n))
                .collect(),
            None => order,
        }
    }
}
