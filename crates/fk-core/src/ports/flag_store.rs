//! Local flag store port.
//!
//! Synchronous string key/value storage that survives restarts. Values are
//! opaque strings; typed access goes through [`super::AuthStateStorePort`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagStoreError {
    #[error("flag store io failed: {0}")]
    Io(String),

    #[error("flag store data corrupt: {0}")]
    Corrupt(String),

    #[error("flag store unavailable")]
    Unavailable,
}

pub trait FlagStorePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, FlagStoreError>;

    /// Overwrites any existing value.
    fn set(&self, key: &str, value: &str) -> Result<(), FlagStoreError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), FlagStoreError>;

    fn clear(&self) -> Result<(), FlagStoreError>;
}
