//! Rezoning Guide core — interaction state machine and event routing.
//!
//! This crate contains everything the guide does in response to user events:
//! - Presentation tree seam ([`PresentationTree`]) with an in-memory implementation
//! - Registry mapping tab, panel, step and result ids to tree handles
//! - Interaction state owned by a single [`Guide`] controller
//! - Tab, timeline panel, decision tree, glossary, search and accessibility controllers
//! - Cancellable deferred actions on a host-driven virtual clock
//! - Blob-store persistence and a fire-and-forget analytics sink
//! - TOML content model and the builder that turns it into a tree

pub mod builder;
pub mod config;
pub mod content;
pub mod error;
pub mod guide;
pub mod keys;
pub mod notify;
pub mod registry;
pub mod sink;
pub mod state;
pub mod store;
pub mod timers;
pub mod tree;

pub use config::GuideConfig;
pub use content::GuideContent;
pub use error::{ConfigError, ContentError, StoreError};
pub use guide::{Guide, MatchKind, SearchMatch};
pub use keys::{Key, KeyOutcome, KeyPress};
pub use notify::{NoticeLevel, Notification};
pub use registry::{Control, Registry};
pub use sink::{EventSink, LogSink, NullSink, RecordingSink, TrackedEvent};
pub use state::{ChoiceTarget, InteractionState, PanelId, ResultId, StepId, TabId};
pub use store::{BlobStore, FileStore, MemoryStore};
pub use tree::{MemoryTree, NodeId, NodeSpec, PresentationTree, ScrollAlign};
