//! Deferred actions on a host-driven virtual clock.
//!
//! The host advances the clock (typically once per event-loop iteration) and
//! runs whatever fell due. Every scheduled action gets a [`TimerId`] so the
//! component that scheduled it can cancel it on a conflicting transition.

use std::time::Duration;

use tracing::trace;

use crate::tree::{NodeId, ScrollAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Work that runs after a delay.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    ScrollIntoView { node: NodeId, align: ScrollAlign },
    Focus(NodeId),
    ClearHighlights,
    DismissNotification(u64),
    ClearAnnouncement,
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TimerId,
    due: Duration,
    action: Deferred,
}

#[derive(Debug, Default)]
pub struct Timers {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, action: Deferred) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let due = self.now + delay;
        trace!(?id, ?due, ?action, "timer scheduled");
        self.pending.push(Scheduled { id, due, action });
        id
    }

    /// Cancel a pending timer. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        before != self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock to `now` and return the actions that fell due, ordered
    /// by due time and then by scheduling order. The clock never goes back.
    pub fn advance(&mut self, now: Duration) -> Vec<Deferred> {
        if now > self.now {
            self.now = now;
        }
        let current = self.now;
        let (mut due, rest): (Vec<Scheduled>, Vec<Scheduled>) =
            self.pending.drain(..).partition(|s| s.due <= current);
        self.pending = rest;
        due.sort_by_key(|s| (s.due, s.id.0));
        due.into_iter().map(|s| s.action).collect()
    }
}
