//! In-memory node tree that stands in for the page the board lives on.
//!
//! The [`Node`] is the fundamental unit – it holds the attributes the engine
//! cares about (id, classes, kind marker, heights, the transient "active"
//! mark) and links to its children via indices into an arena (the
//! [`NodeTree`] struct).  Using an arena avoids recursive `Box` allocations,
//! is cache-friendly, and makes borrowing trivial.

// ───────────────────────────────────────── kind marker ───────

/// Role marker stamped onto managed nodes at registration time, used by the
/// drag controller to dispatch events.  Set exactly once; never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Column,
    Portlet,
}

// ───────────────────────────────────────── node ──────────────

/// A single node in the arena-allocated tree.
///
/// `parent` is the explicit back-reference for ownership queries: a portlet's
/// owning column is whatever `parent` points at, and the drop handler updates
/// it exactly once per move.
#[derive(Debug, Clone)]
pub struct Node {
    /// Element identifier.  May be blank until the registrar assigns one.
    pub id: String,
    /// CSS-style class list used for selector queries.
    pub classes: Vec<String>,
    /// Kind marker (`None` for unmanaged nodes and portal roots).
    pub kind: Option<NodeKind>,
    /// Card title, shown in the border of rendered portlets.
    pub title: String,
    /// Card body lines.  Drives the node's natural height.
    pub body: Vec<String>,
    /// Explicit height set by the balancer.  `None` means "natural height".
    pub height_override: Option<u16>,
    /// Transient visual mark: this node is the current valid drop target.
    pub active: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    /// A bare node with the given class list; everything else empty.
    pub fn with_classes(classes: Vec<String>) -> Self {
        Self {
            id: String::new(),
            classes,
            kind: None,
            title: String::new(),
            body: Vec::new(),
            height_override: None,
            active: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

// ───────────────────────────────────────── arena tree ────────

/// Index into [`NodeTree::nodes`].
pub type NodeId = usize;

/// Arena-backed node tree.
///
/// Nodes are stored in a flat `Vec` and reference each other by index, which
/// keeps ids stable across moves — a portlet keeps its `NodeId` when it is
/// re-parented, so the registrar's lookup maps never go stale.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    pub nodes: Vec<Node>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with no parent (e.g. a portal root) and return its id.
    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    /// Insert a node under `parent_id` and return its [`NodeId`].
    pub fn add_child(&mut self, parent_id: NodeId, mut node: Node) -> NodeId {
        node.parent = Some(parent_id);
        let id = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent_id].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Remove `id` from its parent's child list.  The node itself stays in
    /// the arena (its `NodeId` remains valid) but is no longer reachable
    /// from the tree until re-attached.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }
    }

    /// Append a previously detached node as the last child of `parent_id`.
    pub fn attach(&mut self, parent_id: NodeId, id: NodeId) {
        debug_assert!(self.nodes[id].parent.is_none(), "attach of owned node");
        self.nodes[id].parent = Some(parent_id);
        self.nodes[parent_id].children.push(id);
    }

    /// All descendants of `root` (excluding `root` itself) carrying `class`,
    /// in document order — the `querySelectorAll` of this tree.
    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_class(root, class, &mut out);
        out
    }

    fn collect_class(&self, id: NodeId, class: &str, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[id].children {
            if self.nodes[child].has_class(class) {
                out.push(child);
            }
            self.collect_class(child, class, out);
        }
    }

    // ── geometry ──────────────────────────────────────────────

    /// Height the node wants when no explicit height is set: body lines plus
    /// a border row top and bottom, or the sum of the children's rendered
    /// heights for container nodes.
    pub fn natural_height(&self, id: NodeId) -> u16 {
        let node = &self.nodes[id];
        if node.children.is_empty() {
            2 + node.body.len() as u16
        } else {
            let inner: u16 = node
                .children
                .iter()
                .map(|&c| self.rendered_height(c))
                .sum();
            2 + inner
        }
    }

    /// Height the node actually occupies: the balancer's explicit height if
    /// one is set, natural height otherwise.
    pub fn rendered_height(&self, id: NodeId) -> u16 {
        self.nodes[id]
            .height_override
            .unwrap_or_else(|| self.natural_height(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, lines: usize) -> Node {
        let mut node = Node::with_classes(vec!["url-portlet".into()]);
        node.title = title.into();
        node.body = vec!["x".into(); lines];
        node
    }

    #[test]
    fn detach_then_attach_moves_a_node() {
        let mut tree = NodeTree::new();
        let root = tree.add_root(Node::with_classes(vec!["url-portal".into()]));
        let a = tree.add_child(root, Node::with_classes(vec!["url-column".into()]));
        let b = tree.add_child(root, Node::with_classes(vec!["url-column".into()]));
        let p = tree.add_child(a, card("p", 1));

        tree.detach(p);
        assert!(tree.get(p).parent.is_none());
        assert!(!tree.get(a).children.contains(&p));

        tree.attach(b, p);
        assert_eq!(tree.get(p).parent, Some(b));
        assert_eq!(tree.get(b).children, vec![p]);
    }

    #[test]
    fn query_class_returns_document_order_and_skips_root() {
        let mut tree = NodeTree::new();
        let root = tree.add_root(Node::with_classes(vec!["url-portal".into()]));
        let c1 = tree.add_child(root, Node::with_classes(vec!["url-column".into()]));
        let c2 = tree.add_child(root, Node::with_classes(vec!["url-column".into()]));
        let p1 = tree.add_child(c1, card("p1", 1));
        let p2 = tree.add_child(c2, card("p2", 1));

        assert_eq!(tree.query_class(root, "url-column"), vec![c1, c2]);
        assert_eq!(tree.query_class(root, "url-portlet"), vec![p1, p2]);
        assert_eq!(tree.query_class(c1, "url-portlet"), vec![p1]);
        assert!(tree.query_class(root, "url-portal").is_empty());
    }

    #[test]
    fn natural_height_sums_children_for_containers() {
        let mut tree = NodeTree::new();
        let root = tree.add_root(Node::with_classes(vec!["url-portal".into()]));
        let col = tree.add_child(root, Node::with_classes(vec!["url-column".into()]));
        tree.add_child(col, card("a", 1)); // 3 rows
        tree.add_child(col, card("b", 2)); // 4 rows

        assert_eq!(tree.natural_height(col), 2 + 3 + 4);
    }

    #[test]
    fn rendered_height_prefers_the_override() {
        let mut tree = NodeTree::new();
        let col = tree.add_root(Node::with_classes(vec!["url-column".into()]));
        assert_eq!(tree.rendered_height(col), 2);
        tree.get_mut(col).height_override = Some(9);
        assert_eq!(tree.rendered_height(col), 9);
    }
}
