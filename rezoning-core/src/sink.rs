//! Fire-and-forget analytics sinks.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

/// Accepts (category, action, label) triples. No return value, no retry.
pub trait EventSink {
    fn track_event(&mut self, category: &str, action: &str, label: &str);
}

/// A tracked analytics event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEvent {
    pub category: String,
    pub action: String,
    pub label: String,
}

/// Emits each event as a `tracing` record under the `analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn track_event(&mut self, category: &str, action: &str, label: &str) {
        info!(target: "analytics", category, action, label, "event");
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn track_event(&mut self, _category: &str, _action: &str, _label: &str) {}
}

/// Keeps events for later inspection. Clones share the same buffer, so a
/// caller can hand one clone to the guide and read through another.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<TrackedEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.borrow().clone()
    }
}

impl EventSink for RecordingSink {
    fn track_event(&mut self, category: &str, action: &str, label: &str) {
        self.events.borrow_mut().push(TrackedEvent {
            category: category.to_string(),
            action: action.to_string(),
            label: label.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_clones_share_buffer() {
        let reader = RecordingSink::new();
        let mut writer = reader.clone();
        writer.track_event("navigation", "tab_switch", "developer");
        assert_eq!(
            reader.events(),
            vec![TrackedEvent {
                category: "navigation".into(),
                action: "tab_switch".into(),
                label: "developer".into(),
            }]
        );
    }
}
