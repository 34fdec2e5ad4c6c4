//! `fitkro` command-line entry point.
//!
//! `serve` runs the API. The other commands drive the client flows against
//! the local flag file and print the screen the user would land on.

mod cli;
mod client;

pub use cli::run;
pub use client::PrintedScreenEvents;
