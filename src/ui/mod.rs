//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  It reads page state and never changes it.

pub mod layout;
pub mod page_widget;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;
