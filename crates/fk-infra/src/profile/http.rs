//! Profile service client.
//!
//! Talks to the API's `/profile` routes with the session's bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use fk_core::ports::{ProfileServiceError, ProfileServicePort};
use fk_core::{Profile, ProfileStatus, Session};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    profile: Option<serde_json::Value>,
}

pub struct HttpProfileService {
    http: Client,
    base_url: String,
}

impl HttpProfileService {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn profile_url(&self) -> String {
        format!("{}/profile", self.base_url)
    }
}

fn transport(err: reqwest::Error) -> ProfileServiceError {
    ProfileServiceError::Transport(err.to_string())
}

#[async_trait]
impl ProfileServicePort for HttpProfileService {
    async fn fetch_status(&self, session: &Session) -> Result<ProfileStatus, ProfileServiceError> {
        let response = self
            .http
            .get(self.profile_url())
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => {
                let envelope: ProfileEnvelope = response
                    .json()
                    .await
                    .map_err(|e| ProfileServiceError::Decode(e.to_string()))?;
                let status = ProfileStatus::from_profile_json(envelope.profile.as_ref());
                debug!(?status, "profile status fetched");
                Ok(status)
            }
            StatusCode::NOT_FOUND => Err(ProfileServiceError::NotFound),
            status => Err(ProfileServiceError::Status(status.as_u16())),
        }
    }

    async fn create_profile(
        &self,
        session: &Session,
        profile: &Profile,
    ) -> Result<(), ProfileServiceError> {
        let response = self
            .http
            .post(self.profile_url())
            .bearer_auth(&session.access_token)
            .json(profile)
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProfileServiceError::Status(response.status().as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fk_core::AuthUser;
    use mockito::Server;

    fn session() -> Session {
        Session {
            access_token: "tok".into(),
            user: AuthUser {
                id: "user-1".into(),
                email: None,
                name: None,
            },
        }
    }

    async fn status_for(status: usize, body: &str) -> Result<ProfileStatus, ProfileServiceError> {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/profile")
            .match_header("authorization", "Bearer tok")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;

        HttpProfileService::with_client(Client::new(), format!("{}/api/", server.url()))
            .fetch_status(&session())
            .await
    }

    #[tokio::test]
    async fn completed_profile() {
        let status = status_for(200, r#"{"profile":{"completed":true}}"#).await.unwrap();
        assert_eq!(
            status,
            ProfileStatus {
                exists: true,
                completed: true
            }
        );
    }

    #[tokio::test]
    async fn ok_body_without_profile_is_missing() {
        let status = status_for(200, "{}").await.unwrap();
        assert_eq!(status, ProfileStatus::missing());
    }

    #[tokio::test]
    async fn not_found_and_server_errors_are_errors() {
        assert!(matches!(
            status_for(404, r#"{"error":"Profile not found"}"#).await,
            Err(ProfileServiceError::NotFound)
        ));
        assert!(matches!(
            status_for(500, "{}").await,
            Err(ProfileServiceError::Status(500))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let service = HttpProfileService::with_client(Client::new(), "http://127.0.0.1:9");
        assert!(matches!(
            service.fetch_status(&session()).await,
            Err(ProfileServiceError::Transport(_))
        ));
    }
}
