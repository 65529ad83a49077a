//! Read-only projections of the guide's tree into what the widgets draw.

use rezoning_core::builder::{ATTR_EXPANDED, CLASS_CHOICE, CLASS_HEADING};
use rezoning_core::guide::CLASS_HIGHLIGHT;
use rezoning_core::tree::first_with_class;
use rezoning_core::{Guide, MemoryTree, NodeId, PresentationTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Title,
    Summary,
    Trigger,
    Detail,
}

#[derive(Debug, Clone)]
pub struct TimelineRow {
    pub kind: RowKind,
    pub node: NodeId,
    pub text: String,
    pub opacity: f32,
    pub highlighted: bool,
    pub focused: bool,
}

/// A labelled control and whether it has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub node: NodeId,
    pub label: String,
    pub focused: bool,
}

#[derive(Debug, Clone)]
pub enum DecisionView {
    Question {
        prompt: String,
        choices: Vec<ControlView>,
    },
    Result {
        title: String,
        body: String,
    },
    Empty,
}

#[derive(Debug, Clone)]
pub struct GlossaryView {
    pub query: String,
    pub field_focused: bool,
    pub entries: Vec<(String, String)>,
}

fn own(tree: &MemoryTree, node: NodeId) -> String {
    tree.own_text(node).unwrap_or_default().to_string()
}

/// Own text of the `index`-th child of `node`.
fn child_text(tree: &MemoryTree, node: NodeId, index: usize) -> String {
    tree.children(node)
        .get(index)
        .map(|&c| own(tree, c))
        .unwrap_or_default()
}

fn control(tree: &MemoryTree, node: NodeId) -> ControlView {
    ControlView {
        node,
        label: own(tree, node),
        focused: tree.focused() == Some(node),
    }
}

/// Timeline as flat rows: title, summary and trigger per stage, then the
/// detail body when the panel is open.
pub fn timeline_rows(guide: &Guide<MemoryTree>) -> Vec<TimelineRow> {
    let tree = guide.tree();
    let focused = tree.focused();
    let mut rows = Vec::new();

    for stage in &guide.registry().stages {
        if !tree.is_rendered(stage.item) {
            continue;
        }
        let opacity = tree.opacity(stage.item).unwrap_or(1.0);
        let item_hit = tree.has_class(stage.item, CLASS_HIGHLIGHT);

        rows.push(TimelineRow {
            kind: RowKind::Title,
            node: stage.item,
            text: child_text(tree, stage.card, 0),
            opacity,
            highlighted: item_hit,
            focused: false,
        });
        rows.push(TimelineRow {
            kind: RowKind::Summary,
            node: stage.card,
            text: child_text(tree, stage.card, 1),
            opacity,
            highlighted: item_hit,
            focused: false,
        });

        let open = tree.attr(stage.trigger, ATTR_EXPANDED).as_deref() == Some("true");
        let marker = if open { "▾" } else { "▸" };
        rows.push(TimelineRow {
            kind: RowKind::Trigger,
            node: stage.trigger,
            text: format!("{marker} {}", own(tree, stage.trigger)),
            opacity,
            highlighted: false,
            focused: focused == Some(stage.trigger),
        });

        if tree.is_rendered(stage.content) {
            rows.push(TimelineRow {
                kind: RowKind::Detail,
                node: stage.content,
                text: child_text(tree, stage.content, 1),
                opacity,
                highlighted: tree.has_class(stage.content, CLASS_HIGHLIGHT),
                focused: false,
            });
        }
    }
    rows
}

/// Guide title: the first heading in the tree.
pub fn title(guide: &Guide<MemoryTree>) -> String {
    let tree = guide.tree();
    first_with_class(tree, tree.root(), CLASS_HEADING)
        .map(|h| own(tree, h))
        .unwrap_or_default()
}

/// Search field value and whether it has focus.
pub fn search_field(guide: &Guide<MemoryTree>) -> (String, bool) {
    let field = guide.registry().search_field;
    (
        guide.field_value(field),
        guide.tree().focused() == Some(field),
    )
}

/// Tab labels in order, with the index of the selected one.
pub fn tab_labels(guide: &Guide<MemoryTree>) -> (Vec<String>, usize) {
    let tree = guide.tree();
    let tabs = &guide.registry().tabs;
    let labels = tabs.iter().map(|t| own(tree, t.control)).collect();
    let selected = tabs
        .iter()
        .position(|t| t.id == guide.state().active_tab)
        .unwrap_or(0);
    (labels, selected)
}

/// Summary text of the visible tab panel.
pub fn active_tab_summary(guide: &Guide<MemoryTree>) -> String {
    let tree = guide.tree();
    guide
        .registry()
        .tabs
        .iter()
        .find(|t| tree.is_visible(t.panel))
        .map(|t| own(tree, t.panel))
        .unwrap_or_default()
}

/// Whether a tab control currently has focus.
pub fn tab_has_focus(guide: &Guide<MemoryTree>) -> bool {
    guide
        .tree()
        .focused()
        .and_then(|n| guide.registry().tab_index_of_control(n))
        .is_some()
}

/// Header controls: search button, glossary toggle, decision tree opener.
pub fn header_controls(guide: &Guide<MemoryTree>) -> Vec<ControlView> {
    let tree = guide.tree();
    let r = guide.registry();
    vec![
        control(tree, r.search_button),
        control(tree, r.glossary.toggle),
        control(tree, r.modal.opener),
    ]
}

/// Skip link, only while it has focus.
pub fn skip_link(guide: &Guide<MemoryTree>) -> Option<ControlView> {
    let link = guide.registry().skip_link?;
    let view = control(guide.tree(), link);
    view.focused.then_some(view)
}

pub fn decision(guide: &Guide<MemoryTree>) -> DecisionView {
    let tree = guide.tree();
    let modal = &guide.registry().modal;

    if let Some(q) = modal.questions.iter().find(|q| tree.is_visible(q.node)) {
        let choices = tree
            .children(q.node)
            .into_iter()
            .filter(|&c| tree.has_class(c, CLASS_CHOICE))
            .map(|c| control(tree, c))
            .collect();
        return DecisionView::Question {
            prompt: own(tree, q.node),
            choices,
        };
    }
    if let Some(r) = modal.results.iter().find(|r| tree.is_visible(r.node)) {
        return DecisionView::Result {
            title: child_text(tree, r.node, 0),
            body: child_text(tree, r.node, 1),
        };
    }
    DecisionView::Empty
}

/// Close and back buttons of the decision tree dialog.
pub fn decision_controls(guide: &Guide<MemoryTree>) -> (ControlView, ControlView) {
    let tree = guide.tree();
    let modal = &guide.registry().modal;
    (control(tree, modal.close), control(tree, modal.back))
}

pub fn glossary(guide: &Guide<MemoryTree>) -> GlossaryView {
    let tree = guide.tree();
    let handles = &guide.registry().glossary;
    let entries = handles
        .entries
        .iter()
        .filter(|&&n| tree.is_visible(n))
        .map(|&n| (child_text(tree, n, 0), child_text(tree, n, 1)))
        .collect();
    GlossaryView {
        query: guide.field_value(handles.search_field),
        field_focused: tree.focused() == Some(handles.search_field),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use rezoning_core::{ChoiceTarget, PanelId, StepId, TabId};

    use super::*;
    use crate::app::test_support::sample_app;

    #[test]
    fn collapsed_timeline_has_three_rows_per_stage() {
        let app = sample_app();
        let rows = timeline_rows(&app.guide);
        assert_eq!(rows.len(), app.guide.registry().stages.len() * 3);
        assert_eq!(rows[0].kind, RowKind::Title);
        assert_eq!(rows[0].text, "Pre-Application Meeting");
        assert!(rows[2].text.starts_with('▸'));
    }

    #[test]
    fn open_panel_adds_detail_row() {
        let mut app = sample_app();
        app.guide.toggle_detail_panel(&PanelId::new("staff-review"));
        let rows = timeline_rows(&app.guide);
        let detail = rows.iter().find(|r| r.kind == RowKind::Detail).unwrap();
        assert!(detail.text.contains("arborist"));
        let trigger = rows
            .iter()
            .find(|r| r.kind == RowKind::Trigger && r.text.starts_with('▾'))
            .unwrap();
        assert!(trigger.text.ends_with("Details"));
    }

    #[test]
    fn resident_rows_carry_dimming() {
        let mut app = sample_app();
        app.guide.switch_tab(TabId::Resident);
        let rows = timeline_rows(&app.guide);
        assert!(rows.iter().any(|r| r.opacity < 1.0));
        assert!(rows.iter().any(|r| r.opacity == 1.0));

        app.guide.switch_tab(TabId::Developer);
        let rows = timeline_rows(&app.guide);
        assert!(rows.iter().all(|r| r.opacity == 1.0));
    }

    #[test]
    fn search_hits_are_marked() {
        let mut app = sample_app();
        app.guide.perform_search("mailed notice");
        let rows = timeline_rows(&app.guide);
        let hits: Vec<_> = rows.iter().filter(|r| r.highlighted).map(|r| r.kind).collect();
        assert_eq!(hits, vec![RowKind::Title, RowKind::Summary]);
    }

    #[test]
    fn title_is_first_heading() {
        let app = sample_app();
        assert_eq!(title(&app.guide), "Understanding Rezoning");
    }

    #[test]
    fn tab_labels_follow_selection() {
        let mut app = sample_app();
        app.guide.switch_tab(TabId::Official);
        let (labels, selected) = tab_labels(&app.guide);
        assert_eq!(labels.len(), 3);
        assert_eq!(selected, 2);
        assert!(active_tab_summary(&app.guide).contains("comprehensive plan"));
    }

    #[test]
    fn decision_view_tracks_step_and_result() {
        let mut app = sample_app();
        let opener = app.guide.registry().modal.opener;
        app.guide.open_decision_tree(opener);
        match decision(&app.guide) {
            DecisionView::Question { choices, .. } => {
                assert_eq!(choices.len(), 3);
            }
            other => panic!("expected a question, got {other:?}"),
        }

        app.guide.handle_choice(&ChoiceTarget::Next(StepId(3)));
        app.guide
            .handle_choice(&ChoiceTarget::Result(rezoning_core::ResultId::new("variance")));
        match decision(&app.guide) {
            DecisionView::Result { title, .. } => assert!(!title.is_empty()),
            other => panic!("expected a result, got {other:?}"),
        }
    }

    #[test]
    fn glossary_view_lists_visible_entries() {
        let mut app = sample_app();
        app.guide.toggle_glossary();
        let field = app.guide.registry().glossary.search_field;
        app.guide.input(field, "setback");
        let view = glossary(&app.guide);
        assert_eq!(view.query, "setback");
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].0, "Setback");
    }
}
