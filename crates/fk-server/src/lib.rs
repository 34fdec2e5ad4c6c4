//! # fk-server
//!
//! HTTP API for Fit Kro plus the process bootstrap (configuration, tracing
//! and dependency wiring) shared with the `fitkro` CLI.

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::ApiState;
