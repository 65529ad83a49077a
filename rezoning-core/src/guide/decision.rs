//! Decision tree controller — modal lifecycle and step/result transitions.
//!
//! The authored graph is walked, never checked for cycles. Back navigation
//! decrements the step number; content validation guarantees steps are
//! numbered `1..=n`.

use tracing::debug;

use crate::state::{ChoiceTarget, ResultId, StepId};
use crate::tree::{NodeId, PresentationTree};

use super::Guide;

impl<T: PresentationTree> Guide<T> {
    /// Open the modal from `trigger`: lock body scroll, restart at step 1
    /// and focus the first control inside the dialog.
    pub fn open_decision_tree(&mut self, trigger: NodeId) {
        let root = self.registry.modal.root;
        self.modal.open = true;
        self.modal.return_focus = Some(trigger);
        self.tree.set_scroll_lock(true);
        self.tree.set_visible(root, true);
        self.show_step(StepId::FIRST);

        let first_control = self
            .tree
            .focus_order()
            .into_iter()
            .find(|&n| self.is_inside(n, root));
        if let Some(node) = first_control {
            self.tree.focus(node);
        }
    }

    /// Close the modal, release the scroll lock and return focus to the
    /// control that opened it.
    pub fn close_decision_tree(&mut self) {
        if !self.modal.open {
            return;
        }
        self.modal.open = false;
        self.tree.set_visible(self.registry.modal.root, false);
        self.tree.set_scroll_lock(false);
        if let Some(trigger) = self.modal.return_focus.take() {
            self.tree.focus(trigger);
        }
    }

    pub fn handle_choice(&mut self, target: &ChoiceTarget) {
        match target {
            ChoiceTarget::Next(step) => self.show_step(*step),
            ChoiceTarget::Result(result) => self.show_result(result),
        }
    }

    /// Show exactly the question for `step`. A missing step leaves the
    /// dialog empty; the step is recorded regardless.
    pub fn show_step(&mut self, step: StepId) {
        self.hide_decision_nodes();
        match self.registry.question(step).map(|q| q.node) {
            Some(node) => {
                self.tree.set_visible(node, true);
            }
            None => debug!(%step, "no question for step"),
        }
        self.state.decision_tree_step = step;
    }

    /// Show exactly the result node for `result`.
    pub fn show_result(&mut self, result: &ResultId) {
        self.hide_decision_nodes();
        match self.registry.result(result).map(|r| r.node) {
            Some(node) => {
                self.tree.set_visible(node, true);
            }
            None => debug!(%result, "no node for result"),
        }
    }

    /// Go to the previous step. No-op on step 1.
    pub fn go_back(&mut self) {
        if let Some(previous) = self.state.decision_tree_step.previous() {
            self.show_step(previous);
        }
    }

    fn hide_decision_nodes(&mut self) {
        let nodes: Vec<NodeId> = self.registry.decision_nodes().collect();
        for node in nodes {
            self.tree.set_visible(node, false);
        }
    }

    fn is_inside(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.tree.parent(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.tree.parent(n);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::guide::test_support::*;
    use crate::guide::Guide;
    use crate::state::{ChoiceTarget, ResultId, StepId};
    use crate::tree::{MemoryTree, NodeId, PresentationTree};

    fn visible_decision_nodes(guide: &Guide<MemoryTree>) -> Vec<NodeId> {
        guide
            .registry()
            .decision_nodes()
            .filter(|&n| guide.tree().is_visible(n))
            .collect()
    }

    fn open(guide: &mut Guide<MemoryTree>) {
        let opener = guide.registry().modal.opener;
        guide.click(opener);
    }

    #[test]
    fn open_starts_at_step_one_and_focuses_inside() {
        let mut guide = sample_guide();
        open(&mut guide);

        let step1 = guide.registry().question(StepId(1)).unwrap().node;
        assert!(guide.is_modal_open());
        assert!(guide.tree().scroll_locked());
        assert_eq!(visible_decision_nodes(&guide), vec![step1]);
        assert_eq!(guide.tree().focused(), Some(guide.registry().modal.close));
    }

    #[test]
    fn reopening_never_resumes() {
        let mut guide = sample_guide();
        open(&mut guide);
        guide.handle_choice(&ChoiceTarget::Next(StepId(2)));
        guide.handle_choice(&ChoiceTarget::Next(StepId(3)));
        guide.close_decision_tree();

        open(&mut guide);
        assert_eq!(guide.state().decision_tree_step, StepId(1));
        let step1 = guide.registry().question(StepId(1)).unwrap().node;
        assert_eq!(visible_decision_nodes(&guide), vec![step1]);
    }

    #[test]
    fn close_releases_lock_and_returns_focus() {
        let mut guide = sample_guide();
        open(&mut guide);
        guide.close_decision_tree();
        assert!(!guide.is_modal_open());
        assert!(!guide.tree().scroll_locked());
        assert!(!guide.tree().is_visible(guide.registry().modal.root));
        assert_eq!(guide.tree().focused(), Some(guide.registry().modal.opener));
    }

    #[test]
    fn backdrop_click_closes_but_descendant_click_does_not() {
        let mut guide = sample_guide();
        open(&mut guide);
        let step1 = guide.registry().question(StepId(1)).unwrap().node;
        guide.click(step1);
        assert!(guide.is_modal_open());

        let root = guide.registry().modal.root;
        guide.click(root);
        assert!(!guide.is_modal_open());
    }

    #[test]
    fn back_at_step_one_is_noop() {
        let mut guide = sample_guide();
        open(&mut guide);
        guide.go_back();
        assert_eq!(guide.state().decision_tree_step, StepId(1));
        let step1 = guide.registry().question(StepId(1)).unwrap().node;
        assert_eq!(visible_decision_nodes(&guide), vec![step1]);
    }

    #[test]
    fn back_goes_to_previous_step() {
        let mut guide = sample_guide();
        open(&mut guide);
        guide.show_step(StepId(3));
        guide.go_back();
        assert_eq!(guide.state().decision_tree_step, StepId(2));
        let step2 = guide.registry().question(StepId(2)).unwrap().node;
        assert_eq!(visible_decision_nodes(&guide), vec![step2]);
    }

    #[test]
    fn result_hides_every_question() {
        let mut guide = sample_guide();
        open(&mut guide);
        guide.handle_choice(&ChoiceTarget::Result(ResultId::new("variance")));
        let variance = guide.registry().result(&ResultId::new("variance")).unwrap().node;
        assert_eq!(visible_decision_nodes(&guide), vec![variance]);
    }

    #[test]
    fn missing_step_leaves_dialog_empty() {
        let mut guide = sample_guide();
        open(&mut guide);
        guide.show_step(StepId(9));
        assert!(visible_decision_nodes(&guide).is_empty());
        assert_eq!(guide.state().decision_tree_step, StepId(9));
    }
}
