//! Host-independent key events.

/// A key, as far as the guide cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
}

/// A key press with its modifiers. `meta` is Cmd on macOS hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::new(key)
        }
    }

    pub fn meta(key: Key) -> Self {
        Self {
            meta: true,
            ..Self::new(key)
        }
    }

    /// Ctrl or Cmd held.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Whether the guide consumed a key (the host should suppress its default
/// handling) or let it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Ignored,
}

impl KeyOutcome {
    pub fn is_consumed(self) -> bool {
        self == KeyOutcome::Consumed
    }
}
