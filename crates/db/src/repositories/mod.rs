//! Repository layer.
//!
//! Each repository is a zero-sized struct whose async methods issue exactly
//! one statement. They accept any SQLite executor, so the same method runs
//! against `&DbPool` or inside an open transaction (`&mut *tx`).

pub mod page_repo;
pub mod version_repo;

pub use page_repo::PageRepo;
pub use version_repo::VersionRepo;
