//! Remote profile service port.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::Session;
use crate::profile::{Profile, ProfileStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileServiceError {
    /// 404 from the service. Treated like any other unavailable answer.
    #[error("profile not found")]
    NotFound,

    #[error("profile service returned status {0}")]
    Status(u16),

    #[error("profile service unreachable: {0}")]
    Transport(String),

    #[error("profile response malformed: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ProfileServicePort: Send + Sync {
    /// Completion status for the session's user.
    ///
    /// A 2xx body without a profile yields [`ProfileStatus::missing`].
    async fn fetch_status(&self, session: &Session) -> Result<ProfileStatus, ProfileServiceError>;

    async fn create_profile(
        &self,
        session: &Session,
        profile: &Profile,
    ) -> Result<(), ProfileServiceError>;
}
