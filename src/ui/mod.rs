//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No board mutation happens here.

pub mod board;
pub mod layout;
pub mod theme;
