//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).  The portals own all board mutation; the shell only feeds them
//! events and draws the result.

use ratatui::layout::Rect;

use crate::core::node::{NodeId, NodeTree};
use crate::core::portal::Portal;
use crate::core::registry::ClassConfig;

/// Top-level application state.
pub struct AppState {
    /// The page's node tree (portals, columns, portlets).
    pub tree: NodeTree,
    /// Root node every portal hangs off.
    pub page: NodeId,
    /// Resolved class names used for structural queries.
    pub classes: ClassConfig,
    /// One façade per registered portal.  Empty when drag-and-drop support
    /// was gated off at startup — the board still renders, it just stays
    /// inert.
    pub portals: Vec<Portal>,
    /// Index into `portals` of the portal owning the in-flight gesture.
    pub drag_portal: Option<usize>,
    /// Column currently under the pointer during a drag.
    pub hover_column: Option<NodeId>,
    /// Board region from the last draw; mouse hit-testing works against it.
    pub board_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Optional message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(tree: NodeTree, page: NodeId, classes: ClassConfig, portals: Vec<Portal>) -> Self {
        Self {
            tree,
            page,
            classes,
            portals,
            drag_portal: None,
            hover_column: None,
            board_area: Rect::default(),
            should_quit: false,
            status_message: None,
        }
    }
}
