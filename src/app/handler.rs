//! Input handling — translates key/mouse events into engine events.
//!
//! This is the native-input driver for the drag state machine: mouse button
//! down on a card opens a drag session, mouse movement synthesizes
//! enter/over/leave for the column under the pointer, and button release
//! delivers the drop (or the cancel when released outside any column).

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::core::drag::DragEvent;
use crate::core::node::NodeKind;
use crate::ui::board::{BoardGeometry, Hit};

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        _ => {}
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let geometry = BoardGeometry::compute(
        &state.tree,
        state.page,
        &state.classes,
        state.board_area,
    );

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(hit) = geometry.hit(mouse.column, mouse.row) else {
                return;
            };
            if hit.kind != NodeKind::Portlet {
                return;
            }
            let Some(index) = state
                .portals
                .iter()
                .position(|p| p.root() == hit.portal_root)
            else {
                return; // drag-and-drop gated off, board is inert
            };
            dispatch(state, index, DragEvent::Start { portlet: hit.node });
            if state.portals[index].is_dragging() {
                state.drag_portal = Some(index);
                state.hover_column = None;
                let title = state.tree.get(hit.node).title.clone();
                state.status_message = Some(format!("dragging \"{title}\""));
            }
        }

        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(index) = state.drag_portal else {
                return;
            };
            let hit = geometry.hit(mouse.column, mouse.row);
            track_hover(state, index, hit);
        }

        MouseEventKind::Up(MouseButton::Left) => {
            let Some(index) = state.drag_portal.take() else {
                return;
            };
            let target = state.hover_column.take();
            let portal = &mut state.portals[index];
            match target {
                Some(column) => portal.dispatch(&mut state.tree, DragEvent::Drop { column }),
                None => portal.dispatch(&mut state.tree, DragEvent::End),
            }
            state.status_message = None;
        }

        _ => {}
    }
}

/// Synthesize enter/over/leave from pointer movement.  The engine only ever
/// sees events for the dragging portal; hovering a foreign portal reads as
/// hovering nothing (multi-portal drag is not a thing).
fn track_hover(state: &mut AppState, index: usize, hit: Option<Hit>) {
    let portal_root = state.portals[index].root();
    let hit = hit.filter(|h| h.portal_root == portal_root);

    // Resolve the hovered node to the column that would take the drop.
    let column = hit.and_then(|h| match h.kind {
        NodeKind::Column => Some(h.node),
        NodeKind::Portlet => state.tree.get(h.node).parent,
    });

    if column != state.hover_column {
        if let Some(left) = state.hover_column {
            dispatch(state, index, DragEvent::Leave { node: left });
        }
        if let Some(hit) = hit {
            // Enter carries the raw node; the engine maps a portlet to its
            // owning column itself.
            dispatch(state, index, DragEvent::Enter { node: hit.node });
        }
        state.hover_column = column;
    }

    if let Some(column) = column {
        dispatch(state, index, DragEvent::Over { column });
    }
}

fn dispatch(state: &mut AppState, index: usize, event: DragEvent) {
    let portal = &mut state.portals[index];
    portal.dispatch(&mut state.tree, event);
}

/// Hint shown in the status bar when nothing else is going on.
pub fn status_hint() -> &'static str {
    "drag cards between columns with the mouse · q to quit"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardFile;
    use crate::core::id::IdGen;
    use crate::core::portal::Portal;
    use ratatui::layout::Rect;

    fn app() -> AppState {
        let board = BoardFile::sample();
        let classes = board.class_config();
        let (mut tree, page) = board.instantiate();
        let mut idgen = IdGen::new();
        let portals = tree
            .query_class(page, &classes.portal)
            .into_iter()
            .map(|root| Portal::register(&mut tree, root, classes.clone(), &mut idgen))
            .collect();
        let mut state = AppState::new(tree, page, classes, portals);
        state.board_area = Rect::new(0, 0, 92, 30);
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn press_drag_release_moves_a_card() {
        let mut state = app();
        let geometry = BoardGeometry::compute(
            &state.tree,
            state.page,
            &state.classes,
            state.board_area,
        );
        let (portlet, card) = geometry.portals[0].portlets[0];
        let source = state.tree.get(portlet).parent.unwrap();
        let &(target, target_rect) = geometry.portals[0].columns.last().unwrap();

        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), card.x + 1, card.y + 1),
        );
        assert_eq!(state.drag_portal, Some(0));

        handle_mouse(
            &mut state,
            mouse(
                MouseEventKind::Drag(MouseButton::Left),
                target_rect.x + 1,
                target_rect.y + 1,
            ),
        );
        assert!(state.tree.get(target).active);

        handle_mouse(
            &mut state,
            mouse(
                MouseEventKind::Up(MouseButton::Left),
                target_rect.x + 1,
                target_rect.y + 1,
            ),
        );

        assert_eq!(state.tree.get(portlet).parent, Some(target));
        assert!(!state.tree.get(source).children.contains(&portlet));
        assert!(state.drag_portal.is_none());
        assert!(!state.tree.get(target).active);
    }

    #[test]
    fn release_outside_any_column_cancels() {
        let mut state = app();
        let geometry = BoardGeometry::compute(
            &state.tree,
            state.page,
            &state.classes,
            state.board_area,
        );
        let (portlet, card) = geometry.portals[0].portlets[0];
        let source = state.tree.get(portlet).parent.unwrap();

        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), card.x + 1, card.y + 1),
        );
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 0, 29));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 0, 29));

        assert_eq!(state.tree.get(portlet).parent, Some(source));
        assert!(state.drag_portal.is_none());
        // No stale active mark anywhere.
        let portal_root = state.tree.get(source).parent.unwrap();
        for column in state.tree.get(portal_root).children.clone() {
            assert!(!state.tree.get(column).active);
        }
    }

    #[test]
    fn pressing_q_quits() {
        let mut state = app();
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty()),
        );
        assert!(state.should_quit);
    }
}
