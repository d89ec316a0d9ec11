//! Page behaviors and the document they operate on.
//!
//! Nothing in this module depends on the terminal host or on the async
//! runtime; every behavior is a plain function or state struct over
//! [`document::Document`].

pub mod carousel;
pub mod document;
pub mod error;
pub mod landing;
pub mod listeners;
pub mod markers;
pub mod overlay;
pub mod reveal;
pub mod viewport;
