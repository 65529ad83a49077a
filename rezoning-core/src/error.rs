//! Error types for content loading, configuration and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating authored guide content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("read content file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse content TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("authoring error: {0}")]
    Authoring(String),

    #[error("tree construction: {0}")]
    Build(String),
}

/// Errors raised while loading the guide configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors from a blob store. Callers log these and continue.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("state (de)serialization: {0}")]
    Serde(#[from] serde_json::Error),
}
