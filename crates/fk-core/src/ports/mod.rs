//! Port interfaces for the application layer
//!
//! Ports define the contract between use cases and infrastructure
//! implementations. Use cases depend on `Arc<dyn ...Port>` only.

mod activity;
pub mod auth_state;
mod clock;
mod credential_hasher;
pub mod flag_store;
pub mod kv_store;
pub mod profile_service;
mod screen_event;
pub mod session_provider;
mod suggestion;
mod token_verifier;
pub mod workout_catalog;

pub use activity::ActivityPort;
pub use auth_state::{AuthStateStorePort, WriteOutcome};
pub use clock::*;
pub use credential_hasher::{CredentialHasherPort, HashError};
pub use flag_store::{FlagStoreError, FlagStorePort};
pub use kv_store::{KvStoreError, KvStorePort};
pub use profile_service::{ProfileServiceError, ProfileServicePort};
pub use screen_event::ScreenEventPort;
pub use session_provider::{SessionError, SessionProviderPort};
pub use suggestion::SuggestionProviderPort;
pub use token_verifier::TokenVerifierPort;
pub use workout_catalog::{CatalogError, WorkoutCatalogPort};
