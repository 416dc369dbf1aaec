//! portboard — a drag-and-drop portlet board for the terminal.
//!
//! The [`core`] module is the engine: a node tree, identity registration,
//! column-height balancing, and the drag state machine.  [`app`] and [`ui`]
//! are the terminal shell that feeds the engine native mouse gestures and
//! draws the result.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
