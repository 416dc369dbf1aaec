//! Portal façade — the one object a caller holds per managed board region.
//!
//! Construction runs the registrar (building the id maps), the initial
//! balance pass, and sets up the drag controller.  After that the caller only
//! reads; all further mutation goes through [`Portal::dispatch`].

use std::collections::HashMap;

use thiserror::Error;

use super::balance;
use super::drag::{DragController, DragEvent};
use super::id::IdGen;
use super::node::{NodeId, NodeTree};
use super::registry::{self, ClassConfig};

/// Errors surfaced by the façade's accessors.  All are synchronous and
/// caller-recoverable; the engine has no fatal error class.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// One portal: its root node, the registrar's lookup maps, and the drag
/// controller driving membership changes.
#[derive(Debug)]
pub struct Portal {
    id: String,
    root: NodeId,
    columns: HashMap<String, NodeId>,
    portlets: HashMap<String, NodeId>,
    classes: ClassConfig,
    controller: DragController,
}

impl Portal {
    /// Register the subtree under `root` as a portal: assign identifiers,
    /// stamp kind markers, equalize column heights once, and return the
    /// façade.  A root with no columns or portlets is fine — the maps are
    /// simply empty.
    pub fn register(
        tree: &mut NodeTree,
        root: NodeId,
        classes: ClassConfig,
        idgen: &mut IdGen,
    ) -> Self {
        let registration = registry::register(tree, root, &classes, idgen);

        let columns: Vec<NodeId> = tree.query_class(root, &classes.column);
        balance::equalize(tree, &columns);

        Self {
            id: tree.get(root).id.clone(),
            root,
            columns: registration.columns,
            portlets: registration.portlets,
            controller: DragController::new(classes.clone()),
            classes,
        }
    }

    /// Feed one drag event into this portal's state machine.
    pub fn dispatch(&mut self, tree: &mut NodeTree, event: DragEvent) {
        self.controller
            .handle(tree, &self.columns, &self.portlets, event);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn classes(&self) -> &ClassConfig {
        &self.classes
    }

    /// `true` while a drag gesture on this portal is in flight.
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Identifier of the portlet currently being dragged, if any.
    pub fn dragged_portlet(&self) -> Option<NodeId> {
        self.controller
            .payload()
            .and_then(|id| self.portlets.get(id).copied())
    }

    // ── read accessors ────────────────────────────────────────
    //
    // Iteration order is map order, not layout order; callers wanting the
    // visual arrangement should walk the tree instead.

    /// All portlets registered to this portal.
    pub fn portlets(&self) -> Vec<NodeId> {
        self.portlets.values().copied().collect()
    }

    /// All columns registered to this portal.
    pub fn columns(&self) -> Vec<NodeId> {
        self.columns.values().copied().collect()
    }

    /// The portlets currently inside the column named by `column_id`,
    /// determined by tree containment.
    ///
    /// Fails with [`PortalError::InvalidArgument`] when the id is blank or
    /// names no column of this portal.
    pub fn column_portlets(
        &self,
        tree: &NodeTree,
        column_id: &str,
    ) -> Result<Vec<NodeId>, PortalError> {
        if column_id.trim().is_empty() {
            return Err(PortalError::InvalidArgument(
                "column_portlets requires a column id".into(),
            ));
        }
        let Some(&column) = self.columns.get(column_id) else {
            return Err(PortalError::InvalidArgument(format!(
                "no column {column_id:?} in portal {:?}",
                self.id
            )));
        };
        Ok(tree.query_class(column, &self.classes.portlet))
    }
}
