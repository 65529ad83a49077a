//! Registry of tree handles, built once when the guide is constructed.
//!
//! Maps logical ids (tabs, panels, steps, results) and the fixed widgets to
//! their presentation tree nodes, and indexes every clickable control so
//! event routing never searches the tree by string.

use std::collections::HashMap;

use crate::state::{ChoiceTarget, PanelId, ResultId, StepId, TabId};
use crate::tree::NodeId;

#[derive(Debug, Clone)]
pub struct TabHandle {
    pub id: TabId,
    pub control: NodeId,
    pub panel: NodeId,
}

/// A timeline stage: the item, its summary card, and the detail panel pair.
#[derive(Debug, Clone)]
pub struct StageHandle {
    pub panel: PanelId,
    pub item: NodeId,
    pub card: NodeId,
    pub trigger: NodeId,
    pub content: NodeId,
}

#[derive(Debug, Clone)]
pub struct QuestionHandle {
    pub step: StepId,
    pub node: NodeId,
}

#[derive(Debug, Clone)]
pub struct ResultHandle {
    pub id: ResultId,
    pub node: NodeId,
}

#[derive(Debug, Clone)]
pub struct ModalHandles {
    /// The backdrop. A click whose target is this node dismisses the modal.
    pub root: NodeId,
    pub opener: NodeId,
    pub close: NodeId,
    pub back: NodeId,
    pub questions: Vec<QuestionHandle>,
    pub results: Vec<ResultHandle>,
}

#[derive(Debug, Clone)]
pub struct GlossaryHandles {
    pub overlay: NodeId,
    pub toggle: NodeId,
    pub search_field: NodeId,
    pub entries: Vec<NodeId>,
}

/// What a click on a registered node means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Tab(TabId),
    PanelTrigger(PanelId),
    OpenDecisionTree,
    CloseDecisionTree,
    DecisionBack,
    Choice(ChoiceTarget),
    GlossaryToggle,
    SearchSubmit,
    SkipLink,
}

#[derive(Debug, Clone)]
pub struct Registry {
    pub tabs: Vec<TabHandle>,
    pub stages: Vec<StageHandle>,
    pub modal: ModalHandles,
    pub glossary: GlossaryHandles,
    pub search_field: NodeId,
    pub search_button: NodeId,
    pub main_content: NodeId,
    pub skip_link: Option<NodeId>,
    pub live_region: Option<NodeId>,
    controls: HashMap<NodeId, Control>,
}

impl Registry {
    pub fn new(
        tabs: Vec<TabHandle>,
        stages: Vec<StageHandle>,
        modal: ModalHandles,
        glossary: GlossaryHandles,
        search_field: NodeId,
        search_button: NodeId,
        main_content: NodeId,
    ) -> Self {
        let mut registry = Self {
            tabs,
            stages,
            modal,
            glossary,
            search_field,
            search_button,
            main_content,
            skip_link: None,
            live_region: None,
            controls: HashMap::new(),
        };
        registry.index_controls();
        registry
    }

    fn index_controls(&mut self) {
        let mut controls = HashMap::new();
        for tab in &self.tabs {
            controls.insert(tab.control, Control::Tab(tab.id));
        }
        for stage in &self.stages {
            controls.insert(stage.trigger, Control::PanelTrigger(stage.panel.clone()));
        }
        controls.insert(self.modal.opener, Control::OpenDecisionTree);
        controls.insert(self.modal.close, Control::CloseDecisionTree);
        controls.insert(self.modal.back, Control::DecisionBack);
        controls.insert(self.glossary.toggle, Control::GlossaryToggle);
        controls.insert(self.search_button, Control::SearchSubmit);
        self.controls.extend(controls);
    }

    /// Register an additional control, e.g. a decision tree choice.
    pub fn register_control(&mut self, node: NodeId, control: Control) {
        self.controls.insert(node, control);
    }

    pub fn control(&self, node: NodeId) -> Option<&Control> {
        self.controls.get(&node)
    }

    pub fn tab(&self, id: TabId) -> Option<&TabHandle> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_index_of_control(&self, node: NodeId) -> Option<usize> {
        self.tabs.iter().position(|t| t.control == node)
    }

    pub fn stage(&self, panel: &PanelId) -> Option<&StageHandle> {
        self.stages.iter().find(|s| &s.panel == panel)
    }

    pub fn stage_for_content(&self, node: NodeId) -> Option<&StageHandle> {
        self.stages.iter().find(|s| s.content == node)
    }

    pub fn question(&self, step: StepId) -> Option<&QuestionHandle> {
        self.modal.questions.iter().find(|q| q.step == step)
    }

    pub fn result(&self, id: &ResultId) -> Option<&ResultHandle> {
        self.modal.results.iter().find(|r| &r.id == id)
    }

    /// Every question and result node in the modal.
    pub fn decision_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.modal
            .questions
            .iter()
            .map(|q| q.node)
            .chain(self.modal.results.iter().map(|r| r.node))
    }

    /// Nodes whose value is typed text.
    pub fn is_text_field(&self, node: NodeId) -> bool {
        node == self.search_field || node == self.glossary.search_field
    }
}
