//! Row structs and input DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching a table
//! row and the DTOs used to create new rows.

pub mod page;
pub mod version;
