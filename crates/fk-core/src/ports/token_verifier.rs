use async_trait::async_trait;

use crate::auth::AuthUser;
use crate::ports::SessionError;

/// Server-side bearer token check.
#[async_trait]
pub trait TokenVerifierPort: Send + Sync {
    /// `Ok(None)` when the provider does not recognize the token.
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, SessionError>;
}
