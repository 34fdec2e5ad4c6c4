//! Bearer-token extractor.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use fk_core::AuthUser;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::ApiState;

/// The user behind the request's `Authorization: Bearer` token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<ApiState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ApiState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;

        match state.token_verifier.get_user(token).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => {
                debug!("token rejected by verifier");
                Err(ApiError::Unauthorized)
            }
            Err(err) => {
                warn!(error = %err, "token verification failed");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
