//! Interaction state and the logical ids it is expressed in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Audience view. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    Resident,
    Developer,
    Official,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Resident, TabId::Developer, TabId::Official];

    pub fn as_str(self) -> &'static str {
        match self {
            TabId::Resident => "resident",
            TabId::Developer => "developer",
            TabId::Official => "official",
        }
    }

    /// Identity of the panel this tab reveals.
    pub fn panel_identity(self) -> String {
        format!("{}-panel", self.as_str())
    }

    /// Identity of the tab control itself.
    pub fn control_identity(self) -> String {
        format!("{}-tab", self.as_str())
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detail panel identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decision tree question step. Steps are numbered `1..=n` without gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u32);

impl StepId {
    pub const FIRST: StepId = StepId(1);

    /// The step before this one, if any.
    pub fn previous(self) -> Option<StepId> {
        (self.0 > 1).then(|| StepId(self.0 - 1))
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal decision tree result identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(pub String);

impl ResultId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a decision tree choice leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceTarget {
    Next(StepId),
    Result(ResultId),
}

/// Current UI mode. Owned by the [`Guide`](crate::Guide) and mutated only
/// through its operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionState {
    pub active_tab: TabId,
    /// Open detail panels in the order they were opened.
    pub expanded_panels: Vec<PanelId>,
    pub decision_tree_step: StepId,
    pub glossary_open: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            active_tab: TabId::Resident,
            expanded_panels: Vec::new(),
            decision_tree_step: StepId::FIRST,
            glossary_open: false,
        }
    }
}

impl InteractionState {
    pub fn is_expanded(&self, panel: &PanelId) -> bool {
        self.expanded_panels.contains(panel)
    }

    /// Record a panel as open. Keeps insertion order and rejects duplicates.
    pub(crate) fn mark_expanded(&mut self, panel: PanelId) {
        if !self.expanded_panels.contains(&panel) {
            self.expanded_panels.push(panel);
        }
    }

    pub(crate) fn mark_collapsed(&mut self, panel: &PanelId) {
        self.expanded_panels.retain(|p| p != panel);
    }
}
