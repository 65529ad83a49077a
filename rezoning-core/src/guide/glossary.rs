//! Glossary controller — overlay toggle and substring filtering.

use crate::builder::{ATTR_EXPANDED, ATTR_TERM};
use crate::timers::Deferred;
use crate::tree::PresentationTree;

use super::Guide;

impl<T: PresentationTree> Guide<T> {
    /// Open or close the glossary overlay. Opening focuses the glossary
    /// search field once the overlay has rendered; closing returns focus to
    /// the toggle.
    pub fn toggle_glossary(&mut self) {
        let open = !self.state.glossary_open;
        self.state.glossary_open = open;

        let handles = &self.registry.glossary;
        self.tree.set_visible(handles.overlay, open);
        self.tree
            .set_attr(handles.toggle, ATTR_EXPANDED, if open { "true" } else { "false" });

        if open {
            self.timers.schedule(
                self.config.focus_delay(),
                Deferred::Focus(handles.search_field),
            );
        } else {
            self.tree.focus(handles.toggle);
        }
    }

    /// Show entries whose searchable text contains `query`, ignoring case
    /// and surrounding whitespace. An empty query shows everything.
    pub fn filter_glossary(&mut self, query: &str) {
        let query = query.trim().to_lowercase();
        for &entry in &self.registry.glossary.entries {
            let visible = query.is_empty() || {
                let searchable = self
                    .tree
                    .attr(entry, ATTR_TERM)
                    .or_else(|| self.tree.text(entry).map(|t| t.to_lowercase()))
                    .unwrap_or_default();
                searchable.contains(&query)
            };
            self.tree.set_visible(entry, visible);
        }
    }
}
