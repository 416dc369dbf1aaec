//! Drag controller — the state machine that moves portlets between columns.
//!
//! The controller consumes [`DragEvent`]s and owns the single transient drag
//! session.  It is the only writer of column membership: a successful drop
//! detaches the dragged portlet from its current column and attaches it to
//! the target, then re-balances the target's sibling columns.  Events for
//! nodes the registrar never saw are ignored, which is the arena equivalent
//! of an element that simply has no listeners bound.

use std::collections::HashMap;

use super::balance;
use super::node::{NodeId, NodeKind, NodeTree};
use super::registry::ClassConfig;

// ───────────────────────────────────────── events ────────────

/// One drag-lifecycle event, in platform dispatch order: `Start` opens a
/// session, `Drop` or `End` closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// A drag gesture began on a portlet.
    Start { portlet: NodeId },
    /// The pointer entered a column, or a portlet inside one.
    Enter { node: NodeId },
    /// The pointer is hovering a column; accepting this is what makes a
    /// subsequent `Drop` on that column legal.
    Over { column: NodeId },
    /// The pointer left a column.
    Leave { node: NodeId },
    /// The gesture ended over a column (successful path).
    Drop { column: NodeId },
    /// The gesture ended anywhere else (cancelled path).
    End,
}

/// Effect declared on the transfer.  The platform convention names this
/// "copy" even though the source node is removed on drop, so the operation
/// is a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Copy,
}

// ───────────────────────────────────────── session ───────────

/// Transient per-gesture state.  Exists from `Start` until `Drop`/`End`;
/// at most one at a time (the input device serializes gestures).
#[derive(Debug)]
struct DragSession {
    /// The transfer payload: the dragged portlet's identifier.
    payload: String,
    #[allow(dead_code)]
    effect: DropEffect,
    /// Column whose last `Over` was accepted.  A `Drop` elsewhere is
    /// rejected, mirroring a platform that never saw default handling
    /// suppressed there.
    accepted: Option<NodeId>,
}

// ───────────────────────────────────────── controller ────────

/// Per-portal drag state machine.  Constructed once at registration and
/// driven by whoever translates native input into [`DragEvent`]s.
#[derive(Debug)]
pub struct DragController {
    classes: ClassConfig,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(classes: ClassConfig) -> Self {
        Self {
            classes,
            session: None,
        }
    }

    /// `true` while a drag session is open.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Identifier of the portlet being dragged, if any.
    pub fn payload(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.payload.as_str())
    }

    /// Advance the state machine by one event.
    ///
    /// `columns` and `portlets` are the registrar's maps for this portal;
    /// they decide which nodes the controller reacts to at all.
    pub fn handle(
        &mut self,
        tree: &mut NodeTree,
        columns: &HashMap<String, NodeId>,
        portlets: &HashMap<String, NodeId>,
        event: DragEvent,
    ) {
        match event {
            DragEvent::Start { portlet } => {
                if !is_registered(tree, portlets, portlet) {
                    return;
                }
                let payload = tree.get(portlet).id.clone();
                tracing::debug!(portlet = %payload, "dragstart");
                self.session = Some(DragSession {
                    payload,
                    effect: DropEffect::Copy,
                    accepted: None,
                });
            }

            DragEvent::Enter { node } => {
                if self.session.is_none() {
                    return;
                }
                let target = match tree.get(node).kind {
                    Some(NodeKind::Column) if is_registered(tree, columns, node) => Some(node),
                    // Entering a portlet counts as entering its owning column.
                    Some(NodeKind::Portlet) if is_registered(tree, portlets, node) => {
                        tree.get(node).parent
                    }
                    _ => None,
                };
                if let Some(column) = target {
                    tracing::debug!(column = %tree.get(column).id, "dragenter");
                    tree.get_mut(column).active = true;
                }
            }

            DragEvent::Over { column } => {
                if !is_registered(tree, columns, column) {
                    return;
                }
                if let Some(session) = self.session.as_mut() {
                    session.effect = DropEffect::Copy;
                    session.accepted = Some(column);
                }
            }

            DragEvent::Leave { node } => {
                if !is_registered(tree, columns, node) {
                    return;
                }
                tracing::debug!(column = %tree.get(node).id, "dragleave");
                tree.get_mut(node).active = false;
            }

            DragEvent::Drop { column } => {
                self.drop_on(tree, columns, portlets, column);
                // Whatever happened above, the session is over; a mark left
                // behind by a swallowed Leave must not outlive it.
                self.session = None;
                clear_active_marks(tree, columns);
            }

            DragEvent::End => {
                if self.session.take().is_some() {
                    tracing::debug!("dragend without drop");
                }
                clear_active_marks(tree, columns);
            }
        }
    }

    /// The successful-drop path.  Unknown payloads and drops the platform
    /// would not have delivered (no accepted `Over`) are safe no-ops.
    fn drop_on(
        &mut self,
        tree: &mut NodeTree,
        columns: &HashMap<String, NodeId>,
        portlets: &HashMap<String, NodeId>,
        column: NodeId,
    ) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.accepted != Some(column) || !is_registered(tree, columns, column) {
            tracing::debug!("drop on unaccepted target, ignoring");
            return;
        }
        let Some(&portlet) = portlets.get(&session.payload) else {
            tracing::debug!(payload = %session.payload, "drop with unknown payload, ignoring");
            return;
        };

        tracing::debug!(
            portlet = %tree.get(portlet).id,
            column = %tree.get(column).id,
            "drop"
        );

        // The sole point where column membership changes.
        tree.detach(portlet);
        tree.get_mut(column).active = false;
        tree.attach(column, portlet);

        // Re-balance the target's sibling columns, re-queried by class so
        // the pass always sees current membership.
        if let Some(parent) = tree.get(column).parent {
            let siblings = tree.query_class(parent, &self.classes.column);
            balance::equalize(tree, &siblings);
        }
    }
}

fn is_registered(tree: &NodeTree, map: &HashMap<String, NodeId>, node: NodeId) -> bool {
    map.get(&tree.get(node).id) == Some(&node)
}

fn clear_active_marks(tree: &mut NodeTree, columns: &HashMap<String, NodeId>) {
    for &column in columns.values() {
        tree.get_mut(column).active = false;
    }
}
