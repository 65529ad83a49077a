//! Authored guide content — tabs, timeline stages, decision tree, glossary.
//!
//! Content is a TOML document. It is validated before a tree is built from
//! it, so authoring mistakes surface at load time instead of as an empty
//! modal at runtime.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::state::{ChoiceTarget, PanelId, ResultId, StepId, TabId};

/// The bundled sample guide.
pub const SAMPLE_GUIDE: &str = include_str!("../content/guide.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideContent {
    pub title: String,
    pub tabs: Vec<TabContent>,
    #[serde(default)]
    pub stages: Vec<StageContent>,
    #[serde(default)]
    pub decision_tree: DecisionTreeContent,
    #[serde(default)]
    pub glossary: Vec<GlossaryContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabContent {
    pub id: TabId,
    pub label: String,
    #[serde(default)]
    pub summary: String,
}

/// A timeline stage: summary card plus an expandable detail panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageContent {
    pub id: PanelId,
    pub title: String,
    pub summary: String,
    pub detail: String,
    /// Stages where residents can influence the outcome.
    #[serde(default)]
    pub has_influence: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTreeContent {
    #[serde(default)]
    pub questions: Vec<QuestionContent>,
    #[serde(default)]
    pub results: Vec<ResultContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionContent {
    pub step: StepId,
    pub prompt: String,
    pub choices: Vec<ChoiceContent>,
}

/// As authored: exactly one of `next` and `result` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceContent {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<StepId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultId>,
}

impl ChoiceContent {
    /// The choice's target, or `None` when it names both or neither.
    pub fn target(&self) -> Option<ChoiceTarget> {
        match (&self.next, &self.result) {
            (Some(step), None) => Some(ChoiceTarget::Next(*step)),
            (None, Some(result)) => Some(ChoiceTarget::Result(result.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultContent {
    pub id: ResultId,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryContent {
    pub term: String,
    pub definition: String,
    /// Precomputed search tag. When present, filtering matches against it
    /// instead of the full entry text.
    #[serde(default)]
    pub tag: Option<String>,
}

impl GuideContent {
    /// Load and validate content from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate content from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ContentError> {
        let guide: GuideContent = toml::from_str(content)?;
        guide.validate()?;
        Ok(guide)
    }

    /// The bundled sample guide.
    pub fn sample() -> Result<Self, ContentError> {
        Self::from_toml(SAMPLE_GUIDE)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.tabs.is_empty() {
            return Err(authoring("guide declares no tabs"));
        }

        let mut tabs = HashSet::new();
        for tab in &self.tabs {
            if !tabs.insert(tab.id) {
                return Err(authoring(format!("duplicate tab '{}'", tab.id)));
            }
        }

        let mut stages = HashSet::new();
        for stage in &self.stages {
            if !stages.insert(stage.id.as_str()) {
                return Err(authoring(format!("duplicate stage '{}'", stage.id)));
            }
        }

        let tree = &self.decision_tree;
        let mut results = HashSet::new();
        for result in &tree.results {
            if !results.insert(result.id.as_str()) {
                return Err(authoring(format!("duplicate result '{}'", result.id)));
            }
        }

        // Back navigation decrements the step number, so steps must be 1..=n.
        let mut steps: Vec<u32> = tree.questions.iter().map(|q| q.step.0).collect();
        steps.sort_unstable();
        for (i, step) in steps.iter().enumerate() {
            let expected = i as u32 + 1;
            if *step != expected {
                return Err(authoring(format!(
                    "decision tree steps must be numbered 1..={} without gaps; found step {step} where {expected} was expected",
                    steps.len()
                )));
            }
        }

        for question in &tree.questions {
            if question.choices.is_empty() {
                return Err(authoring(format!("step {} has no choices", question.step)));
            }
            for choice in &question.choices {
                match choice.target() {
                    None => {
                        return Err(authoring(format!(
                            "step {} choice '{}' must set exactly one of `next` or `result`",
                            question.step, choice.label
                        )))
                    }
                    Some(ChoiceTarget::Next(step)) => {
                        if step.0 == 0 || step.0 as usize > steps.len() {
                            return Err(authoring(format!(
                                "step {} choice '{}' points at missing step {step}",
                                question.step, choice.label
                            )));
                        }
                    }
                    Some(ChoiceTarget::Result(result)) => {
                        if !results.contains(result.as_str()) {
                            return Err(authoring(format!(
                                "step {} choice '{}' points at missing result '{result}'",
                                question.step, choice.label
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

fn authoring(message: impl Into<String>) -> ContentError {
    ContentError::Authoring(message.into())
}
