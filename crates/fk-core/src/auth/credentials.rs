use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Email fragments that route an account to local demo mode.
const DEMO_MARKERS: [&str; 3] = ["@demo", "@test", "@example"];

/// Demo accounts never touch the remote session provider.
pub fn is_demo_email(email: &str) -> bool {
    DEMO_MARKERS.iter().any(|marker| email.contains(marker))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("Please enter both email and password")]
    Missing,
    #[error("Password must be at least {min_len} characters long")]
    PasswordTooShort { min_len: usize },
}

/// Email/password pair submitted from the auth screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, CredentialsError> {
        let email = email.into().trim().to_string();
        let password = password.into();

        if email.is_empty() || password.is_empty() {
            return Err(CredentialsError::Missing);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::PasswordTooShort {
                min_len: MIN_PASSWORD_LEN,
            });
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_demo(&self) -> bool {
        is_demo_email(&self.email)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
