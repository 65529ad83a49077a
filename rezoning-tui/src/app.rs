//! Application state — single-owner, main-thread only.
//!
//! The guide owns all interaction state; this wraps it with what only the
//! terminal host needs: the clock origin, the quit flag and the timeline
//! scroll offset.

use std::time::{Duration, Instant};

use rezoning_core::{Guide, MemoryTree, NodeId, PresentationTree, ScrollAlign, TabId};

use crate::view;

/// Rows kept above a centered scroll target.
const CENTER_MARGIN: usize = 6;

pub struct AppState {
    pub guide: Guide<MemoryTree>,
    pub running: bool,
    pub timeline_scroll: u16,
    started: Instant,
    last_scroll: Option<(NodeId, ScrollAlign)>,
}

impl AppState {
    pub fn new(guide: Guide<MemoryTree>) -> Self {
        let last_scroll = guide.tree().scrolled_to();
        Self {
            guide,
            running: true,
            timeline_scroll: 0,
            started: Instant::now(),
            last_scroll,
        }
    }

    /// Virtual clock for the guide's deferred actions.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Run due deferred actions, then follow any new scroll request.
    pub fn tick(&mut self) {
        let now = self.elapsed();
        self.guide.tick(now);
        self.sync_scroll();
    }

    /// Move the timeline viewport to the node the guide last scrolled to,
    /// if that changed since the previous call.
    pub fn sync_scroll(&mut self) {
        let current = self.guide.tree().scrolled_to();
        if current == self.last_scroll {
            return;
        }
        self.last_scroll = current;
        let Some((node, align)) = current else {
            return;
        };
        let rows = view::timeline_rows(&self.guide);
        let Some(row) = rows.iter().position(|r| r.node == node) else {
            return;
        };
        let top = match align {
            ScrollAlign::Start => row,
            ScrollAlign::Center => row.saturating_sub(CENTER_MARGIN),
        };
        self.timeline_scroll = u16::try_from(top).unwrap_or(u16::MAX);
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = view::timeline_rows(&self.guide).len().saturating_sub(1);
        let next = (i64::from(self.timeline_scroll) + i64::from(delta)).clamp(0, max as i64);
        self.timeline_scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }

    /// The focused node, if it is a text field.
    pub fn focused_text_field(&self) -> Option<NodeId> {
        self.guide
            .tree()
            .focused()
            .filter(|&n| self.guide.registry().is_text_field(n))
    }

    pub fn active_tab(&self) -> TabId {
        self.guide.state().active_tab
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
