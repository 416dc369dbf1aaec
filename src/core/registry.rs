//! Identity registrar — stamps ids and kind markers onto a portal subtree
//! and builds the lookup maps the drop handler needs for O(1) access.
//!
//! Registration is infallible: a portal with no matching columns or portlets
//! simply yields empty maps.

use std::collections::HashMap;

use super::id::IdGen;
use super::node::{NodeId, NodeKind, NodeTree};

/// Id prefixes, one per entity kind so generated ids read like
/// `url-portal-column-3`.
pub const PORTAL_ID_PREFIX: &str = "url-portal-";
pub const COLUMN_ID_PREFIX: &str = "url-portal-column-";
pub const PORTLET_ID_PREFIX: &str = "url-portlet-";

/// Class names that select the managed regions of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassConfig {
    pub portal: String,
    pub column: String,
    pub portlet: String,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            portal: "url-portal".into(),
            column: "url-column".into(),
            portlet: "url-portlet".into(),
        }
    }
}

/// The registrar's output: id → node maps for one portal.
#[derive(Debug, Default)]
pub struct Registration {
    pub columns: HashMap<String, NodeId>,
    pub portlets: HashMap<String, NodeId>,
}

/// Walk the subtree under `portal`, assign missing identifiers, stamp kind
/// markers, and return the lookup maps.
///
/// An existing id is preserved unless it is blank or whitespace-only, in
/// which case a fresh one is drawn from `idgen`.
pub fn register(
    tree: &mut NodeTree,
    portal: NodeId,
    classes: &ClassConfig,
    idgen: &mut IdGen,
) -> Registration {
    ensure_id(tree, portal, PORTAL_ID_PREFIX, idgen);

    let mut registration = Registration::default();

    for column in tree.query_class(portal, &classes.column) {
        ensure_id(tree, column, COLUMN_ID_PREFIX, idgen);
        tree.get_mut(column).kind = Some(NodeKind::Column);
        registration
            .columns
            .insert(tree.get(column).id.clone(), column);
    }

    for portlet in tree.query_class(portal, &classes.portlet) {
        ensure_id(tree, portlet, PORTLET_ID_PREFIX, idgen);
        tree.get_mut(portlet).kind = Some(NodeKind::Portlet);
        registration
            .portlets
            .insert(tree.get(portlet).id.clone(), portlet);
    }

    registration
}

fn ensure_id(tree: &mut NodeTree, id: NodeId, prefix: &str, idgen: &mut IdGen) {
    if tree.get(id).id.trim().is_empty() {
        tree.get_mut(id).id = idgen.next(prefix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::Node;

    fn sample_tree() -> (NodeTree, NodeId) {
        let mut tree = NodeTree::new();
        let portal = tree.add_root(Node::with_classes(vec!["url-portal".into()]));
        let c1 = tree.add_child(portal, Node::with_classes(vec!["url-column".into()]));
        let _c2 = tree.add_child(portal, Node::with_classes(vec!["url-column".into()]));
        tree.add_child(c1, Node::with_classes(vec!["url-portlet".into()]));
        tree.add_child(c1, Node::with_classes(vec!["url-portlet".into()]));
        (tree, portal)
    }

    #[test]
    fn blank_ids_are_generated_and_unique() {
        let (mut tree, portal) = sample_tree();
        let mut idgen = IdGen::new();
        let reg = register(&mut tree, portal, &ClassConfig::default(), &mut idgen);

        assert_eq!(tree.get(portal).id, "url-portal-1");
        assert_eq!(reg.columns.len(), 2);
        assert_eq!(reg.portlets.len(), 2);

        let mut all: Vec<&String> = reg.columns.keys().chain(reg.portlets.keys()).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn existing_ids_survive_but_whitespace_does_not() {
        let (mut tree, portal) = sample_tree();
        let columns = tree.query_class(portal, "url-column");
        tree.get_mut(columns[0]).id = "left".into();
        tree.get_mut(columns[1]).id = "   ".into();

        let mut idgen = IdGen::new();
        let reg = register(&mut tree, portal, &ClassConfig::default(), &mut idgen);

        assert!(reg.columns.contains_key("left"));
        assert!(reg.columns.contains_key("url-portal-column-1"));
    }

    #[test]
    fn kind_markers_are_stamped() {
        let (mut tree, portal) = sample_tree();
        let mut idgen = IdGen::new();
        let reg = register(&mut tree, portal, &ClassConfig::default(), &mut idgen);

        for &column in reg.columns.values() {
            assert_eq!(tree.get(column).kind, Some(NodeKind::Column));
        }
        for &portlet in reg.portlets.values() {
            assert_eq!(tree.get(portlet).kind, Some(NodeKind::Portlet));
        }
    }

    #[test]
    fn empty_portal_yields_empty_maps() {
        let mut tree = NodeTree::new();
        let portal = tree.add_root(Node::with_classes(vec!["url-portal".into()]));
        let mut idgen = IdGen::new();
        let reg = register(&mut tree, portal, &ClassConfig::default(), &mut idgen);
        assert!(reg.columns.is_empty());
        assert!(reg.portlets.is_empty());
    }
}
