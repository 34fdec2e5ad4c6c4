//! # Configuration DTO
//!
//! Maps a parsed TOML document into [`AppConfig`]. This module holds data
//! only: no validation and no policy. Missing keys become empty values and
//! it is up to the caller to decide what an empty value means.

use std::path::{Path, PathBuf};

/// Application configuration DTO (pure data, no logic).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the API server binds to (may be empty).
    pub server_bind: String,

    /// API server port. `0` when not configured.
    pub server_port: u16,

    /// Prefix mounted in front of every API route, e.g. `/api`.
    pub base_path: String,

    /// Base URL of the GoTrue-compatible auth service.
    pub auth_url: String,

    /// Anonymous API key sent as the `apikey` header.
    pub auth_anon_key: String,

    /// Base URL of the profile REST service used by clients.
    pub profile_base_url: String,

    /// Root data directory.
    pub data_dir: PathBuf,

    /// SQLite database path for the KV store.
    pub database_path: PathBuf,

    /// JSON file backing the local flag store.
    pub flags_path: PathBuf,

    /// JSON file containing the workout catalog.
    pub workout_catalog_path: PathBuf,

    /// Directory for rolling log files.
    pub log_dir: PathBuf,
}

fn str_at<'a>(value: &'a toml::Value, section: &str, key: &str) -> &'a str {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

impl AppConfig {
    /// Create an `AppConfig` from a TOML value.
    ///
    /// Empty strings are valid facts. Out-of-range ports are truncated.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            server_bind: str_at(toml_value, "server", "bind").to_string(),
            server_port: toml_value
                .get("server")
                .and_then(|s| s.get("port"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0) as u16,
            base_path: str_at(toml_value, "server", "base_path").to_string(),
            auth_url: str_at(toml_value, "auth", "url").to_string(),
            auth_anon_key: str_at(toml_value, "auth", "anon_key").to_string(),
            profile_base_url: str_at(toml_value, "profile", "base_url").to_string(),
            data_dir: PathBuf::from(str_at(toml_value, "storage", "data_dir")),
            database_path: PathBuf::from(str_at(toml_value, "storage", "database_path")),
            flags_path: PathBuf::from(str_at(toml_value, "storage", "flags_path")),
            workout_catalog_path: PathBuf::from(str_at(
                toml_value,
                "storage",
                "workout_catalog_path",
            )),
            log_dir: PathBuf::from(str_at(toml_value, "logging", "dir")),
        })
    }

    /// Create an empty `AppConfig`.
    pub fn empty() -> Self {
        Self {
            server_bind: String::new(),
            server_port: 0,
            base_path: String::new(),
            auth_url: String::new(),
            auth_anon_key: String::new(),
            profile_base_url: String::new(),
            data_dir: PathBuf::new(),
            database_path: PathBuf::new(),
            flags_path: PathBuf::new(),
            workout_catalog_path: PathBuf::new(),
            log_dir: PathBuf::new(),
        }
    }

    /// Build paths under a data directory chosen by the caller.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("fitkro.db"),
            flags_path: data_dir.join("auth_flags.json"),
            workout_catalog_path: data_dir.join("workouts.json"),
            log_dir: data_dir.join("logs"),
            data_dir,
            ..Self::empty()
        }
    }

    /// Fill empty path fields from [`AppConfig::with_system_defaults`].
    pub fn or_defaults_under(mut self, data_dir: &Path) -> Self {
        let defaults = Self::with_system_defaults(data_dir.to_path_buf());
        if self.data_dir.as_os_str().is_empty() {
            self.data_dir = defaults.data_dir;
        }
        if self.database_path.as_os_str().is_empty() {
            self.database_path = defaults.database_path;
        }
        if self.flags_path.as_os_str().is_empty() {
            self.flags_path = defaults.flags_path;
        }
        if self.workout_catalog_path.as_os_str().is_empty() {
            self.workout_catalog_path = defaults.workout_catalog_path;
        }
        if self.log_dir.as_os_str().is_empty() {
            self.log_dir = defaults.log_dir;
        }
        self
    }
}
