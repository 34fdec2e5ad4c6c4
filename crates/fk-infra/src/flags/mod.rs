//! Local flag storage.
//!
//! [`FileFlagStore`] is the persistent primary, [`InMemoryFlagStore`] the
//! secondary, and [`LayeredAuthStateStore`] puts typed access and an
//! in-memory mirror on top of both.

mod auth_state;
mod file_store;
mod memory_store;

pub use auth_state::LayeredAuthStateStore;
pub use file_store::{FileFlagStore, DEFAULT_FLAGS_FILE};
pub use memory_store::InMemoryFlagStore;
