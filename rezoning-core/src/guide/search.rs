//! Search controller — substring scan over timeline cards and detail panels.
//!
//! No indexing or ranking: matches come back in document order, timeline
//! cards first, then detail panels.

use tracing::debug;

use crate::builder::{ATTR_EXPANDED, CLASS_HEADING, CLASS_TIMELINE_ITEM};
use crate::notify::NoticeLevel;
use crate::timers::Deferred;
use crate::tree::{self, NodeId, PresentationTree, ScrollAlign};

use super::Guide;

pub const CLASS_HIGHLIGHT: &str = "search-highlight";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Timeline,
    Detail,
}

/// One search hit. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub kind: MatchKind,
    pub target: NodeId,
    pub title: String,
}

impl<T: PresentationTree> Guide<T> {
    /// Search for `query`, highlight and reveal the matches, and report the
    /// outcome as a notification. An empty query raises a blocking notice
    /// and changes nothing else.
    pub fn perform_search(&mut self, query: &str) -> Vec<SearchMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            self.alert("Please enter a search term");
            return Vec::new();
        }

        let matches = self.find_matches(&query);
        debug!(%query, count = matches.len(), "search");

        if let Some(previous) = self.highlight_timer.take() {
            self.timers.cancel(previous);
        }
        self.clear_highlights();

        if matches.is_empty() {
            self.notify(
                NoticeLevel::Warning,
                format!("No results found for \"{query}\""),
            );
            return matches;
        }

        for hit in &matches {
            self.tree.add_class(hit.target, CLASS_HIGHLIGHT);
            if hit.kind == MatchKind::Detail {
                self.reveal_panel(hit.target);
            }
        }
        self.tree.scroll_into_view(matches[0].target, ScrollAlign::Center);

        let noun = if matches.len() == 1 { "result" } else { "results" };
        self.notify(
            NoticeLevel::Success,
            format!("Found {} {noun}", matches.len()),
        );

        self.highlight_timer = Some(
            self.timers
                .schedule(self.config.highlight_duration(), Deferred::ClearHighlights),
        );

        matches
    }

    fn find_matches(&self, query: &str) -> Vec<SearchMatch> {
        let contains = |node: NodeId| {
            self.tree
                .text(node)
                .is_some_and(|text| text.to_lowercase().contains(query))
        };

        let mut matches = Vec::new();
        for stage in &self.registry.stages {
            if contains(stage.card) {
                let target = tree::closest(&self.tree, stage.card, CLASS_TIMELINE_ITEM)
                    .unwrap_or(stage.card);
                matches.push(SearchMatch {
                    kind: MatchKind::Timeline,
                    target,
                    title: self.heading_text(target),
                });
            }
        }
        for stage in &self.registry.stages {
            if contains(stage.content) {
                matches.push(SearchMatch {
                    kind: MatchKind::Detail,
                    target: stage.content,
                    title: self.heading_text(stage.content),
                });
            }
        }
        matches
    }

    fn heading_text(&self, node: NodeId) -> String {
        tree::first_with_class(&self.tree, node, CLASS_HEADING)
            .and_then(|h| self.tree.text(h))
            .unwrap_or_default()
    }

    /// Open a matched detail panel. The search's own centered scroll stays
    /// in effect, so the panel queues none.
    fn reveal_panel(&mut self, content: NodeId) {
        let Some(stage) = self.registry.stage_for_content(content) else {
            return;
        };
        let expanded = self.tree.attr(stage.trigger, ATTR_EXPANDED).as_deref() == Some("true");
        if !expanded {
            let panel = stage.panel.clone();
            self.toggle_panel(&panel, false);
        }
    }

    pub(super) fn clear_highlights(&mut self) {
        let root = self.tree.root();
        for node in self.tree.descendants(root) {
            if self.tree.has_class(node, CLASS_HIGHLIGHT) {
                self.tree.remove_class(node, CLASS_HIGHLIGHT);
            }
        }
    }

    /// Nodes currently carrying the search highlight.
    pub fn highlighted(&self) -> Vec<NodeId> {
        let root = self.tree.root();
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| self.tree.has_class(n, CLASS_HIGHLIGHT))
            .collect()
    }
}
