//! Locally persisted auth flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Storage keys used by the local flag store.
pub mod keys {
    pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
    pub const CACHED_PROFILE: &str = "demo_profile";
    pub const SIGNUP_PREFILL: &str = "signup_prefill";
    pub const DEMO_SESSION: &str = "demo_session";
    pub const DEMO_USER: &str = "demo_user";
    /// Session cached by the remote session provider adapter.
    pub const AUTH_SESSION: &str = "auth_session";

    /// Keys removed on sign-out.
    pub const SIGN_OUT: [&str; 6] = [
        ONBOARDING_COMPLETED,
        CACHED_PROFILE,
        SIGNUP_PREFILL,
        DEMO_SESSION,
        DEMO_USER,
        AUTH_SESSION,
    ];
}

/// Email/name pair carried from sign-up into the onboarding form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupPrefill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SignupPrefill {
    /// Build a prefill whose name is the local part of the email.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            email: Some(email.to_string()),
            name: Some(name),
        }
    }

    /// Email, if present and non-blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    pub fn has_email(&self) -> bool {
        self.email().is_some()
    }
}

/// Locally simulated account used in demo mode.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoUser {
    pub email: String,
    pub name: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_demo: bool,
}

impl std::fmt::Debug for DemoUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .field("is_demo", &self.is_demo)
            .finish_non_exhaustive()
    }
}

fn default_true() -> bool {
    true
}

/// Locally simulated session for a [`DemoUser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoSession {
    pub access_token: String,
    pub user: DemoUser,
}

impl DemoSession {
    /// Demo tokens are `demo_token_<epoch millis>`.
    pub fn issue(user: DemoUser, now_ms: i64) -> Self {
        Self {
            access_token: format!("demo_token_{now_ms}"),
            user,
        }
    }
}

/// Snapshot of every locally persisted auth flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalAuthFlags {
    /// `Some(true)` only when the stored value is exactly `"true"`.
    pub onboarding_completed: Option<bool>,
    pub cached_profile: Option<Profile>,
    pub signup_prefill: Option<SignupPrefill>,
    pub demo_session: Option<DemoSession>,
    pub demo_user: Option<DemoUser>,
}

impl LocalAuthFlags {
    /// Both halves of a demo account are present.
    pub fn has_demo_session(&self) -> bool {
        self.demo_session.is_some() && self.demo_user.is_some()
    }

    pub fn is_onboarding_completed(&self) -> bool {
        self.onboarding_completed == Some(true)
    }
}

/// Parse the raw `onboarding_completed` value. Anything other than `"true"`
/// counts as not completed.
pub fn parse_onboarding_flag(raw: &str) -> bool {
    raw == "true"
}

pub fn format_onboarding_flag(completed: bool) -> &'static str {
    if completed {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefill_from_email_uses_local_part_as_name() {
        let prefill = SignupPrefill::from_email("new+1700000000@example.com");
        assert_eq!(prefill.email(), Some("new+1700000000@example.com"));
        assert_eq!(prefill.name.as_deref(), Some("new+1700000000"));
    }

    #[test]
    fn blank_prefill_email_is_treated_as_missing() {
        let prefill = SignupPrefill {
            email: Some("   ".to_string()),
            name: Some("x".to_string()),
        };
        assert!(!prefill.has_email());
    }

    #[test]
    fn prefill_tolerates_missing_fields_in_json() {
        let prefill: SignupPrefill = serde_json::from_str(r#"{"name":"only"}"#).unwrap();
        assert_eq!(prefill.email, None);
        assert_eq!(prefill.name.as_deref(), Some("only"));
    }

    #[test]
    fn demo_session_requires_both_halves() {
        let user = DemoUser {
            email: "a@demo.com".to_string(),
            name: "a".to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
            is_demo: true,
        };
        let mut flags = LocalAuthFlags {
            demo_user: Some(user.clone()),
            ..Default::default()
        };
        assert!(!flags.has_demo_session());

        flags.demo_session = Some(DemoSession::issue(user, 42));
        assert!(flags.has_demo_session());
        assert_eq!(
            flags.demo_session.as_ref().unwrap().access_token,
            "demo_token_42"
        );
    }

    #[test]
    fn onboarding_flag_only_accepts_exact_true() {
        assert!(parse_onboarding_flag("true"));
        assert!(!parse_onboarding_flag("false"));
        assert!(!parse_onboarding_flag("TRUE"));
        assert!(!parse_onboarding_flag(""));
    }

    #[test]
    fn demo_user_debug_hides_password_hash() {
        let user = DemoUser {
            email: "a@demo.com".to_string(),
            name: "a".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            is_demo: true,
        };
        assert!(!format!("{user:?}").contains("argon2id"));
    }
}
