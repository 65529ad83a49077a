//! Transient notifications and the blocking notice slot.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// A non-blocking notification. Dismissed automatically after a while.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub created: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
    blocking: Option<String>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push_back(Notification {
            id,
            level,
            message: message.into(),
            created: Local::now(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        before != self.items.len()
    }

    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Show a notice that stays until acknowledged. Replaces any previous one.
    pub fn block(&mut self, message: impl Into<String>) {
        self.blocking = Some(message.into());
    }

    pub fn blocking(&self) -> Option<&str> {
        self.blocking.as_deref()
    }

    pub fn acknowledge(&mut self) -> Option<String> {
        self.blocking.take()
    }
}
