//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* state machines and turns them into cells on
//! the terminal.  No I/O happens here.

pub mod layout;
pub mod navbar;
pub mod page;
pub mod popup;
pub mod smooth_scroll;
pub mod spinner;
pub mod status;
pub mod theme;
pub mod wrap;
