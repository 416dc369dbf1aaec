//! Core drag-and-drop engine – node tree, identity, balancing, and the drag
//! state machine.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The engine
//! is driven entirely by [`drag::DragEvent`] values, so tests can script
//! whole gestures without a terminal.

pub mod balance;
pub mod drag;
pub mod id;
pub mod node;
pub mod portal;
pub mod registry;
