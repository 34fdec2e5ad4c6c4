//! Infrastructure adapters implementing the `fk-core` ports.

pub mod activity;
pub mod auth;
pub mod catalog;
pub mod db;
pub mod flags;
pub mod kv;
pub mod profile;
pub mod security;
pub mod suggestion;
pub mod time;

pub use activity::SimulatedActivity;
pub use auth::GoTrueClient;
pub use catalog::JsonWorkoutCatalog;
pub use flags::{FileFlagStore, InMemoryFlagStore, LayeredAuthStateStore};
pub use kv::InMemoryKvStore;
pub use profile::HttpProfileService;
pub use security::Argon2CredentialHasher;
pub use suggestion::CannedSuggestionProvider;
pub use time::SystemClock;
