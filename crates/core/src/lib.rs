//! Domain types shared by the wiki's storage and HTTP layers.
//!
//! This crate has no internal dependencies: it holds the error taxonomy,
//! the id/timestamp aliases, page input validation and the Markdown renderer.

pub mod error;
pub mod markup;
pub mod page;
pub mod types;
