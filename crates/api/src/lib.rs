//! Wiki HTTP server library.
//!
//! Exposes the building blocks (config, state, error handling, views,
//! routes) so integration tests and the binaries can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;
