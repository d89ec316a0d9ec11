//! Application orchestration: state, page controller, event loop plumbing and
//! input handling.

pub mod debounce;
pub mod event;
pub mod handler;
pub mod page;
pub mod runtime;
pub mod state;
