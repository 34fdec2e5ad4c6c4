//! # Configuration loading
//!
//! Reads the TOML file into [`AppConfig`] without validation. Empty values
//! are facts; [`resolve_config`] is the single place that fills them.

use std::path::{Path, PathBuf};

use anyhow::Context;
use fk_core::config::AppConfig;

const DATA_DIR_NAME: &str = "fitkro";

/// Environment variables that override the file, after `.env` is loaded.
pub const ENV_AUTH_URL: &str = "FITKRO_AUTH_URL";
pub const ENV_AUTH_ANON_KEY: &str = "FITKRO_AUTH_ANON_KEY";
pub const ENV_PROFILE_URL: &str = "FITKRO_PROFILE_URL";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Per-user data directory, e.g. `~/.local/share/fitkro`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(DATA_DIR_NAME)
}

/// Load the optional config file, apply environment overrides and fill
/// every empty path under the data directory.
pub fn resolve_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => AppConfig::empty(),
    };
    let config = apply_env_overrides(config, |name| std::env::var(name).ok());

    let data_dir = if config.data_dir.as_os_str().is_empty() {
        default_data_dir()
    } else {
        config.data_dir.clone()
    };
    Ok(config.or_defaults_under(&data_dir))
}

fn apply_env_overrides(
    mut config: AppConfig,
    var: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    if let Some(url) = var(ENV_AUTH_URL) {
        config.auth_url = url;
    }
    if let Some(key) = var(ENV_AUTH_ANON_KEY) {
        config.auth_anon_key = key;
    }
    if let Some(url) = var(ENV_PROFILE_URL) {
        config.profile_base_url = url;
    }
    config
}
