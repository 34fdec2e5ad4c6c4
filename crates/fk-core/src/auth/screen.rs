use serde::{Deserialize, Serialize};

/// Top-level screen shown by the client.
///
/// Derived on every reconciliation pass, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenState {
    /// First evaluation has not finished yet.
    Loading,
    /// Sign-in / sign-up.
    Auth,
    /// Profile setup form.
    Onboarding,
    /// Main application.
    App,
}

impl ScreenState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenState::Loading => "loading",
            ScreenState::Auth => "auth",
            ScreenState::Onboarding => "onboarding",
            ScreenState::App => "app",
        }
    }
}

impl std::fmt::Display for ScreenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Developer override forcing a specific screen.
///
/// Parsed from a query string such as `auth=1` or `onboarding=1`. When both
/// are present `auth` wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenOverride {
    forced: Option<ScreenState>,
}

impl ScreenOverride {
    /// No override; the full reconciliation runs.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn force(screen: ScreenState) -> Self {
        Self {
            forced: Some(screen),
        }
    }

    /// Parse `key=value` pairs separated by `&`. A leading `?` is ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let is_set = |name: &str| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .any(|(key, value)| key == name && value == "1")
        };

        if is_set("auth") {
            Self::force(ScreenState::Auth)
        } else if is_set("onboarding") {
            Self::force(ScreenState::Onboarding)
        } else {
            Self::none()
        }
    }

    pub fn forced(&self) -> Option<ScreenState> {
        self.forced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_query_forces_auth() {
        assert_eq!(
            ScreenOverride::from_query("?auth=1").forced(),
            Some(ScreenState::Auth)
        );
    }

    #[test]
    fn from_query_forces_onboarding() {
        assert_eq!(
            ScreenOverride::from_query("dev=0&onboarding=1").forced(),
            Some(ScreenState::Onboarding)
        );
    }

    #[test]
    fn from_query_prefers_auth_over_onboarding() {
        assert_eq!(
            ScreenOverride::from_query("onboarding=1&auth=1").forced(),
            Some(ScreenState::Auth)
        );
    }

    #[test]
    fn from_query_ignores_other_values() {
        assert_eq!(ScreenOverride::from_query("auth=0&e2e=1").forced(), None);
        assert_eq!(ScreenOverride::from_query("").forced(), None);
    }

    #[test]
    fn screen_state_serializes_lowercase() {
        let json = serde_json::to_string(&ScreenState::Onboarding).unwrap();
        assert_eq!(json, "\"onboarding\"");
    }
}
