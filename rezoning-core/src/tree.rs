//! Presentation tree seam and its in-memory implementation.
//!
//! Controllers never assume a concrete tree: they go through
//! [`PresentationTree`]. Every mutator reports whether the node existed, so
//! callers can skip missing nodes silently.

use std::collections::{BTreeMap, BTreeSet};

/// Handle to a node in a presentation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Where a scrolled-to node should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    Center,
}

/// Description of a node to create.
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    pub identity: Option<String>,
    pub text: String,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub hidden: bool,
    pub focusable: bool,
}

impl NodeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }
}

/// A queryable, mutable tree of labeled nodes.
pub trait PresentationTree {
    fn root(&self) -> NodeId;
    fn contains(&self, node: NodeId) -> bool;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn identity(&self, node: NodeId) -> Option<String>;

    /// Full text of the node and its descendants, in document order.
    fn text(&self, node: NodeId) -> Option<String>;
    fn set_text(&mut self, node: NodeId, text: &str) -> bool;

    fn attr(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> bool;

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str) -> bool;
    fn remove_class(&mut self, node: NodeId, class: &str) -> bool;

    /// The node's own visibility flag, ignoring ancestors.
    fn is_visible(&self, node: NodeId) -> bool;
    fn set_visible(&mut self, node: NodeId, visible: bool) -> bool;

    fn opacity(&self, node: NodeId) -> Option<f32>;
    fn set_opacity(&mut self, node: NodeId, opacity: f32) -> bool;

    fn is_focusable(&self, node: NodeId) -> bool;
    fn focus(&mut self, node: NodeId) -> bool;
    fn focused(&self) -> Option<NodeId>;

    fn scroll_into_view(&mut self, node: NodeId, align: ScrollAlign) -> bool;
    fn set_scroll_lock(&mut self, locked: bool);

    /// Insert a new node under `parent` at `index` (clamped to the child count).
    fn insert(&mut self, parent: NodeId, index: usize, spec: NodeSpec) -> Option<NodeId>;
    /// Remove a node and its subtree.
    fn remove(&mut self, node: NodeId) -> bool;

    /// Pre-order traversal below `node`, excluding `node` itself.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// Visible itself and through every ancestor.
    fn is_rendered(&self, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(n) = current {
            if !self.is_visible(n) {
                return false;
            }
            current = self.parent(n);
        }
        true
    }

    /// Rendered focusable nodes in document order.
    fn focus_order(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&n| self.is_focusable(n) && self.is_rendered(n))
            .collect()
    }
}

/// Nearest ancestor-or-self carrying `class`.
pub fn closest<T: PresentationTree + ?Sized>(tree: &T, node: NodeId, class: &str) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(n) = current {
        if tree.has_class(n, class) {
            return Some(n);
        }
        current = tree.parent(n);
    }
    None
}

/// First descendant of `node` carrying `class`.
pub fn first_with_class<T: PresentationTree + ?Sized>(
    tree: &T,
    node: NodeId,
    class: &str,
) -> Option<NodeId> {
    tree.descendants(node)
        .into_iter()
        .find(|&n| tree.has_class(n, class))
}

#[derive(Debug, Clone)]
struct Node {
    identity: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    attrs: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    visible: bool,
    opacity: f32,
    focusable: bool,
}

impl Node {
    fn from_spec(spec: NodeSpec, parent: Option<NodeId>) -> Self {
        Self {
            identity: spec.identity,
            parent,
            children: Vec::new(),
            text: spec.text,
            attrs: spec.attrs.into_iter().collect(),
            classes: spec.classes.into_iter().collect(),
            visible: !spec.hidden,
            opacity: 1.0,
            focusable: spec.focusable,
        }
    }
}

/// In-memory presentation tree. Removed nodes leave a tombstone so handles
/// held elsewhere stay unambiguous.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    nodes: Vec<Option<Node>>,
    focused: Option<NodeId>,
    scrolled_to: Option<(NodeId, ScrollAlign)>,
    scroll_locked: bool,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    pub fn new() -> Self {
        let root = Node::from_spec(NodeSpec::new().identity("body"), None);
        Self {
            nodes: vec![Some(root)],
            focused: None,
            scrolled_to: None,
            scroll_locked: false,
        }
    }

    /// Append a child at the end of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: NodeSpec) -> Option<NodeId> {
        self.insert(parent, usize::MAX, spec)
    }

    /// Last scroll request, if any.
    pub fn scrolled_to(&self) -> Option<(NodeId, ScrollAlign)> {
        self.scrolled_to
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// The node's own text, without descendants.
    pub fn own_text(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.text.as_str())
    }

    /// Look a node up by identity.
    pub fn by_identity(&self, identity: &str) -> Option<NodeId> {
        self.nodes.iter().enumerate().find_map(|(i, n)| {
            n.as_ref()
                .filter(|n| n.identity.as_deref() == Some(identity))
                .map(|_| NodeId(i))
        })
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn collect_text(&self, id: NodeId, out: &mut Vec<String>) {
        if let Some(node) = self.node(id) {
            if !node.text.is_empty() {
                out.push(node.text.clone());
            }
            for &child in &node.children {
                self.collect_text(child, out);
            }
        }
    }
}

impl PresentationTree for MemoryTree {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn identity(&self, node: NodeId) -> Option<String> {
        self.node(node).and_then(|n| n.identity.clone())
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.node(node)?;
        let mut parts = Vec::new();
        self.collect_text(node, &mut parts);
        Some(parts.join(" "))
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> bool {
        match self.node_mut(node) {
            Some(n) => {
                n.text = text.to_string();
                true
            }
            None => false,
        }
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node).and_then(|n| n.attrs.get(name).cloned())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        match self.node_mut(node) {
            Some(n) => {
                n.attrs.insert(name.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        match self.node_mut(node) {
            Some(n) => {
                n.classes.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        match self.node_mut(node) {
            Some(n) => {
                n.classes.remove(class);
                true
            }
            None => false,
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.visible)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) -> bool {
        match self.node_mut(node) {
            Some(n) => n.visible = visible,
            None => return false,
        }
        // Hidden nodes cannot hold focus.
        if !visible && self.focused.is_some_and(|f| !self.is_rendered(f)) {
            self.focused = None;
        }
        true
    }

    fn opacity(&self, node: NodeId) -> Option<f32> {
        self.node(node).map(|n| n.opacity)
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) -> bool {
        match self.node_mut(node) {
            Some(n) => {
                n.opacity = opacity.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    fn is_focusable(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.focusable)
    }

    fn focus(&mut self, node: NodeId) -> bool {
        if self.is_focusable(node) {
            self.focused = Some(node);
            true
        } else {
            false
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|&n| self.is_rendered(n))
    }

    fn scroll_into_view(&mut self, node: NodeId, align: ScrollAlign) -> bool {
        if self.contains(node) {
            self.scrolled_to = Some((node, align));
            true
        } else {
            false
        }
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn insert(&mut self, parent: NodeId, index: usize, spec: NodeSpec) -> Option<NodeId> {
        self.node(parent)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::from_spec(spec, Some(parent))));
        let siblings = &mut self.node_mut(parent)?.children;
        let at = index.min(siblings.len());
        siblings.insert(at, id);
        Some(id)
    }

    fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root() || !self.contains(node) {
            return false;
        }
        if let Some(parent) = self.parent(node) {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
        let mut doomed = self.descendants(node);
        doomed.push(node);
        for id in doomed {
            if let Some(slot) = self.nodes.get_mut(id.0) {
                *slot = None;
            }
        }
        true
    }
}
