//! Fit Kro application layer
//!
//! Use cases orchestrate the ports defined in `fk-core`. Nothing in this crate
//! knows about HTTP, files or SQLite.

pub mod deps;
pub mod usecases;

pub use deps::{ApiDeps, ClientDeps};
