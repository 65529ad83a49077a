//! Guide configuration — timings, de-emphasis and storage key.
//!
//! Stored as an optional TOML file. Every field has a default, so a partial
//! file only overrides what it names.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Delay before scrolling a freshly expanded panel into view.
    pub scroll_delay_ms: u64,
    /// Delay before focusing the glossary search field after opening.
    pub focus_delay_ms: u64,
    /// Lifetime of a non-blocking notification.
    pub notification_ms: u64,
    /// Lifetime of search highlight markers.
    pub highlight_ms: u64,
    /// Delay before the live region is emptied again.
    pub announce_clear_ms: u64,
    /// Opacity applied to de-emphasized timeline items on the resident tab.
    pub deemphasis_opacity: f32,
    /// Blob name under which interaction state is saved.
    pub storage_key: String,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            scroll_delay_ms: 100,
            focus_delay_ms: 100,
            notification_ms: 3_000,
            highlight_ms: 5_000,
            announce_clear_ms: 1_000,
            deemphasis_opacity: 0.5,
            storage_key: "rezoning-guide-state".to_string(),
        }
    }
}

impl GuideConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    pub fn announce_clear_delay(&self) -> Duration {
        Duration::from_millis(self.announce_clear_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = GuideConfig::from_toml("highlight_ms = 2500\n").unwrap();
        assert_eq!(config.highlight_ms, 2_500);
        assert_eq!(config.scroll_delay_ms, 100);
        assert_eq!(config.storage_key, "rezoning-guide-state");
    }

    #[test]
    fn missing_file_returns_defaults() {
        let config = GuideConfig::load(Path::new("/nonexistent/rezoning/config.toml")).unwrap();
        assert_eq!(config, GuideConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "highlight_ms = \"soon\"").unwrap();
        assert!(matches!(GuideConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn durations_follow_millis() {
        let config = GuideConfig::default();
        assert_eq!(config.highlight_duration(), Duration::from_secs(5));
        assert_eq!(config.announce_clear_delay(), Duration::from_secs(1));
    }
}
