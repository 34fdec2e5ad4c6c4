//! GoTrue (Supabase auth) HTTP client.
//!
//! Implements the client-side [`SessionProviderPort`] and the server-side
//! [`TokenVerifierPort`]. The client caches its session as JSON under
//! `auth_session` in a flag store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use fk_core::auth::keys;
use fk_core::ports::{FlagStorePort, SessionError, SessionProviderPort, TokenVerifierPort};
use fk_core::{AuthUser, Credentials, Session};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl From<GoTrueUser> for AuthUser {
    fn from(user: GoTrueUser) -> Self {
        let name = user
            .user_metadata
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        AuthUser {
            id: user.id,
            email: user.email,
            name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: GoTrueUser,
}

/// Sign-up answers with a session when confirmation is disabled, otherwise
/// with the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(GoTrueUser),
}

pub struct GoTrueClient {
    http: Client,
    base_url: String,
    anon_key: String,
    session_cache: Arc<dyn FlagStorePort>,
}

impl GoTrueClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        session_cache: Arc<dyn FlagStorePort>,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(http, base_url, anon_key, session_cache))
    }

    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        session_cache: Arc<dyn FlagStorePort>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            session_cache,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.anon_key)
    }

    fn cached_session(&self) -> Result<Option<Session>, SessionError> {
        let raw = self
            .session_cache
            .get(keys::AUTH_SESSION)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        match raw {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| SessionError::Decode(e.to_string())),
        }
    }

    fn store_session(&self, session: &Session) -> Result<(), SessionError> {
        let json =
            serde_json::to_string(session).map_err(|e| SessionError::Decode(e.to_string()))?;
        self.session_cache
            .set(keys::AUTH_SESSION, &json)
            .map_err(|e| SessionError::Storage(e.to_string()))
    }

    fn forget_session(&self) {
        if let Err(err) = self.session_cache.remove(keys::AUTH_SESSION) {
            warn!(error = %err, "failed to drop cached session");
        }
    }

    async fn fetch_user(&self, access_token: &str) -> Result<Option<AuthUser>, SessionError> {
        let response = self
            .request(self.http.get(self.url("user")))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => {
                let user: GoTrueUser = response
                    .json()
                    .await
                    .map_err(|e| SessionError::Decode(e.to_string()))?;
                Ok(Some(user.into()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            _ => Err(rejected(response).await),
        }
    }
}

fn transport(err: reqwest::Error) -> SessionError {
    SessionError::Transport(err.to_string())
}

/// Pull the human-readable message out of a GoTrue error body.
async fn rejected(response: Response) -> SessionError {
    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().await.unwrap_or_default();
    let message = ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|field| body.get(field).and_then(|v| v.as_str()))
        .unwrap_or("request failed")
        .to_string();
    SessionError::Rejected { status, message }
}

#[async_trait]
impl SessionProviderPort for GoTrueClient {
    async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        let Some(session) = self.cached_session()? else {
            return Ok(None);
        };

        match self.fetch_user(&session.access_token).await? {
            Some(user) => Ok(Some(Session {
                access_token: session.access_token,
                user,
            })),
            None => {
                debug!("cached session rejected by provider");
                self.forget_session();
                Ok(None)
            }
        }
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, SessionError> {
        let response = self
            .request(self.http.post(self.url("token?grant_type=password")))
            .json(&json!({
                "email": credentials.email(),
                "password": credentials.password(),
            }))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SessionError::Decode(e.to_string()))?;
        let session = Session {
            access_token: token.access_token,
            user: token.user.into(),
        };
        self.store_session(&session)?;
        info!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<Option<Session>, SessionError> {
        let response = self
            .request(self.http.post(self.url("signup")))
            .json(&json!({
                "email": credentials.email(),
                "password": credentials.password(),
                "data": { "name": name },
            }))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let body: SignUpResponse = response
            .json()
            .await
            .map_err(|e| SessionError::Decode(e.to_string()))?;

        match body {
            SignUpResponse::Session(token) => {
                let session = Session {
                    access_token: token.access_token,
                    user: token.user.into(),
                };
                self.store_session(&session)?;
                info!(user_id = %session.user.id, "signed up with immediate session");
                Ok(Some(session))
            }
            SignUpResponse::User(user) => {
                info!(user_id = %user.id, "signed up, confirmation pending");
                Ok(None)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        let session = self.cached_session().ok().flatten();
        self.forget_session();

        let Some(session) = session else {
            return Ok(());
        };

        let response = self
            .request(self.http.post(self.url("logout")))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(()),
            _ => Err(rejected(response).await),
        }
    }
}

#[async_trait]
impl TokenVerifierPort for GoTrueClient {
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, SessionError> {
        self.fetch_user(access_token).await
    }
}
