use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// One-way password hashing for locally stored demo accounts.
pub trait CredentialHasherPort: Send + Sync {
    /// Hash into a self-describing string (PHC format).
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// `false` for a mismatch or an unparseable hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
