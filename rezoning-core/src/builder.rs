//! Builds a [`MemoryTree`] and its [`Registry`] from guide content.
//!
//! Layout:
//! ```text
//! body
//! ├── header: title, search field + button, glossary toggle, decision tree opener
//! ├── tablist: one control per tab
//! ├── main: one panel per tab, then the timeline
//! │   └── timeline-item × n: card (heading + summary), detail trigger, detail panel
//! ├── modal backdrop: dialog with close, questions, results, back
//! └── glossary overlay: search field, entries
//! ```

use crate::content::GuideContent;
use crate::error::ContentError;
use crate::registry::{
    Control, GlossaryHandles, ModalHandles, QuestionHandle, Registry, ResultHandle, StageHandle,
    TabHandle,
};
use crate::tree::{MemoryTree, NodeId, NodeSpec, PresentationTree};

pub const CLASS_HEADING: &str = "heading";
pub const CLASS_TIMELINE_ITEM: &str = "timeline-item";
pub const CLASS_TIMELINE_CARD: &str = "timeline-card";
pub const CLASS_DETAIL_PANEL: &str = "detail-panel";
pub const CLASS_HAS_INFLUENCE: &str = "has-influence";
pub const CLASS_QUESTION: &str = "question";
pub const CLASS_RESULT: &str = "result";
pub const CLASS_CHOICE: &str = "choice";
pub const CLASS_GLOSSARY_TERM: &str = "glossary-term";

pub const ATTR_EXPANDED: &str = "aria-expanded";
pub const ATTR_SELECTED: &str = "aria-selected";
pub const ATTR_CONTROLS: &str = "aria-controls";
pub const ATTR_TERM: &str = "data-term";
pub const ATTR_VALUE: &str = "value";

struct Builder {
    tree: MemoryTree,
}

impl Builder {
    fn add(&mut self, parent: NodeId, spec: NodeSpec) -> Result<NodeId, ContentError> {
        self.tree
            .append(parent, spec)
            .ok_or_else(|| ContentError::Build(format!("parent {parent:?} missing")))
    }
}

/// Validate `content` and lay it out as a tree.
pub fn build(content: &GuideContent) -> Result<(MemoryTree, Registry), ContentError> {
    content.validate()?;

    let mut b = Builder {
        tree: MemoryTree::new(),
    };
    let root = b.tree.root();

    // Header
    let header = b.add(root, NodeSpec::new().identity("header").class("header"))?;
    b.add(header, NodeSpec::new().class(CLASS_HEADING).text(&content.title))?;
    let search_field = b.add(
        header,
        NodeSpec::new()
            .identity("search-input")
            .class("search-field")
            .attr(ATTR_VALUE, "")
            .focusable(),
    )?;
    let search_button = b.add(
        header,
        NodeSpec::new()
            .identity("search-button")
            .class("button")
            .text("Search")
            .focusable(),
    )?;
    let glossary_toggle = b.add(
        header,
        NodeSpec::new()
            .identity("glossary-toggle")
            .class("button")
            .text("Glossary")
            .attr(ATTR_EXPANDED, "false")
            .attr(ATTR_CONTROLS, "glossary")
            .focusable(),
    )?;
    let modal_opener = b.add(
        header,
        NodeSpec::new()
            .identity("decision-tree-button")
            .class("button")
            .text("Do I need a rezoning?")
            .focusable(),
    )?;

    // Tabs
    let tablist = b.add(root, NodeSpec::new().identity("tablist").class("tablist"))?;
    let mut tab_controls = Vec::new();
    for (i, tab) in content.tabs.iter().enumerate() {
        let control = b.add(
            tablist,
            NodeSpec::new()
                .identity(tab.id.control_identity())
                .class("tab")
                .text(&tab.label)
                .attr(ATTR_SELECTED, if i == 0 { "true" } else { "false" })
                .attr(ATTR_CONTROLS, tab.id.panel_identity())
                .focusable(),
        )?;
        tab_controls.push(control);
    }

    let main = b.add(
        root,
        NodeSpec::new().identity("main-content").class("main").focusable(),
    )?;
    let mut tabs = Vec::new();
    for (i, (tab, control)) in content.tabs.iter().zip(tab_controls).enumerate() {
        let mut spec = NodeSpec::new()
            .identity(tab.id.panel_identity())
            .class("tab-panel")
            .text(&tab.summary);
        if i > 0 {
            spec = spec.hidden();
        }
        let panel = b.add(main, spec)?;
        tabs.push(TabHandle {
            id: tab.id,
            control,
            panel,
        });
    }

    // Timeline
    let timeline = b.add(main, NodeSpec::new().identity("timeline").class("timeline"))?;
    let mut stages = Vec::new();
    for stage in &content.stages {
        let mut item_spec = NodeSpec::new()
            .identity(stage.id.as_str())
            .class(CLASS_TIMELINE_ITEM);
        if stage.has_influence {
            item_spec = item_spec.class(CLASS_HAS_INFLUENCE);
        }
        let item = b.add(timeline, item_spec)?;

        let card = b.add(item, NodeSpec::new().class(CLASS_TIMELINE_CARD))?;
        b.add(card, NodeSpec::new().class(CLASS_HEADING).text(&stage.title))?;
        b.add(card, NodeSpec::new().class("summary").text(&stage.summary))?;

        let detail_identity = format!("{}-detail", stage.id);
        let trigger = b.add(
            item,
            NodeSpec::new()
                .class("detail-trigger")
                .text("Details")
                .attr(ATTR_EXPANDED, "false")
                .attr(ATTR_CONTROLS, &detail_identity)
                .focusable(),
        )?;
        let content_node = b.add(
            item,
            NodeSpec::new()
                .identity(detail_identity)
                .class(CLASS_DETAIL_PANEL)
                .hidden(),
        )?;
        b.add(content_node, NodeSpec::new().class(CLASS_HEADING).text(&stage.title))?;
        b.add(content_node, NodeSpec::new().class("body").text(&stage.detail))?;

        stages.push(StageHandle {
            panel: stage.id.clone(),
            item,
            card,
            trigger,
            content: content_node,
        });
    }

    // Decision tree modal
    let modal_root = b.add(
        root,
        NodeSpec::new()
            .identity("decision-modal")
            .class("modal")
            .attr("role", "dialog")
            .hidden(),
    )?;
    let dialog = b.add(modal_root, NodeSpec::new().class("modal-content"))?;
    let close = b.add(
        dialog,
        NodeSpec::new()
            .class("modal-close")
            .text("Close")
            .attr("aria-label", "Close")
            .focusable(),
    )?;

    let mut choices = Vec::new();
    let mut questions = Vec::new();
    for question in &content.decision_tree.questions {
        let node = b.add(
            dialog,
            NodeSpec::new()
                .class(CLASS_QUESTION)
                .attr("data-step", question.step.to_string())
                .text(&question.prompt)
                .hidden(),
        )?;
        for choice in &question.choices {
            let Some(target) = choice.target() else {
                continue;
            };
            let button = b.add(
                node,
                NodeSpec::new()
                    .class(CLASS_CHOICE)
                    .text(&choice.label)
                    .focusable(),
            )?;
            choices.push((button, target));
        }
        questions.push(QuestionHandle {
            step: question.step,
            node,
        });
    }

    let mut results = Vec::new();
    for result in &content.decision_tree.results {
        let node = b.add(
            dialog,
            NodeSpec::new()
                .class(CLASS_RESULT)
                .attr("data-result", result.id.as_str())
                .hidden(),
        )?;
        b.add(node, NodeSpec::new().class(CLASS_HEADING).text(&result.title))?;
        b.add(node, NodeSpec::new().class("body").text(&result.body))?;
        results.push(ResultHandle {
            id: result.id.clone(),
            node,
        });
    }

    let back = b.add(
        dialog,
        NodeSpec::new().class("modal-back").text("Back").focusable(),
    )?;

    // Glossary
    let overlay = b.add(
        root,
        NodeSpec::new()
            .identity("glossary")
            .class("glossary")
            .attr("role", "dialog")
            .hidden(),
    )?;
    let glossary_field = b.add(
        overlay,
        NodeSpec::new()
            .identity("glossary-search")
            .class("search-field")
            .attr(ATTR_VALUE, "")
            .focusable(),
    )?;
    let mut entries = Vec::new();
    for entry in &content.glossary {
        let mut spec = NodeSpec::new().class(CLASS_GLOSSARY_TERM);
        if let Some(tag) = &entry.tag {
            spec = spec.attr(ATTR_TERM, tag.to_lowercase());
        }
        let node = b.add(overlay, spec)?;
        b.add(node, NodeSpec::new().class("term").text(&entry.term))?;
        b.add(node, NodeSpec::new().class("definition").text(&entry.definition))?;
        entries.push(node);
    }

    let mut registry = Registry::new(
        tabs,
        stages,
        ModalHandles {
            root: modal_root,
            opener: modal_opener,
            close,
            back,
            questions,
            results,
        },
        GlossaryHandles {
            overlay,
            toggle: glossary_toggle,
            search_field: glossary_field,
            entries,
        },
        search_field,
        search_button,
        main,
    );
    for (button, target) in choices {
        registry.register_control(button, Control::Choice(target));
    }

    Ok((b.tree, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ChoiceTarget, PanelId, StepId, TabId};

    fn sample() -> (MemoryTree, Registry) {
        build(&GuideContent::sample().unwrap()).unwrap()
    }

    #[test]
    fn first_tab_selected_and_shown() {
        let (tree, registry) = sample();
        let first = &registry.tabs[0];
        assert_eq!(first.id, TabId::Resident);
        assert_eq!(tree.attr(first.control, ATTR_SELECTED).as_deref(), Some("true"));
        assert!(tree.is_visible(first.panel));
        for tab in &registry.tabs[1..] {
            assert!(!tree.is_visible(tab.panel));
        }
    }

    #[test]
    fn stages_start_collapsed() {
        let (tree, registry) = sample();
        for stage in &registry.stages {
            assert!(!tree.is_visible(stage.content));
            assert_eq!(tree.attr(stage.trigger, ATTR_EXPANDED).as_deref(), Some("false"));
        }
        assert!(registry.stage(&PanelId::new("notice")).is_some());
    }

    #[test]
    fn choices_are_registered_controls() {
        let (tree, registry) = sample();
        let step1 = registry.question(StepId(1)).unwrap().node;
        let first_choice = tree.children(step1)[0];
        assert_eq!(
            registry.control(first_choice),
            Some(&Control::Choice(ChoiceTarget::Next(StepId(2))))
        );
    }

    #[test]
    fn glossary_tags_are_lowercased_attrs() {
        let (tree, registry) = sample();
        let first = registry.glossary.entries[0];
        assert_eq!(tree.attr(first, ATTR_TERM).as_deref(), Some("zoning district"));
        let setback = registry.glossary.entries[3];
        assert_eq!(tree.attr(setback, ATTR_TERM), None);
    }

    #[test]
    fn modal_and_glossary_start_hidden() {
        let (tree, registry) = sample();
        assert!(!tree.is_visible(registry.modal.root));
        assert!(!tree.is_visible(registry.glossary.overlay));
        assert!(registry.decision_nodes().all(|n| !tree.is_visible(n)));
    }
}
