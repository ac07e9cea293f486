// SPDX-License-Identifier: Apache-2.0

//! Configuration management for scangate.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Command-line flags (applied by the CLI on top of the loaded config)
//! 2. Environment variables (prefix: `SCANGATE_`, separator `__`)
//! 3. Config file: `~/.config/scangate/config.toml`
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Point at a self-hosted scan engine
//! SCANGATE_API__HOSTNAME=scans.internal.example.com scangate status <id>
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ScangateError;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scan API settings.
    pub api: ApiConfig,
    /// Polling cadence settings.
    pub poll: PollSettings,
}

/// Scan API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scan engine hostname, without scheme.
    pub hostname: String,
    /// API key. Usually supplied via `SCANGATE_API__TOKEN` or `--token`
    /// rather than the config file.
    pub token: Option<String>,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            hostname: crate::scan::DEFAULT_HOSTNAME.to_string(),
            token: None,
            timeout_seconds: 30,
        }
    }
}

/// Polling cadence settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Delay between status probes in seconds.
    pub interval_seconds: u64,
    /// Total wait deadline in seconds. Zero means a single probe.
    pub timeout_seconds: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_seconds: 20,
            timeout_seconds: 3600,
        }
    }
}

/// Returns the scangate configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/scangate`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("scangate");
    }
    dirs::home_dir()
        .expect("Could not determine home directory - is HOME set?")
        .join(".config")
        .join("scangate")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Loads the application configuration from file and environment.
///
/// # Errors
///
/// Returns a configuration error when the file or environment values cannot
/// be parsed into [`AppConfig`].
pub fn load_config() -> Result<AppConfig, ScangateError> {
    let config_path = config_file_path();

    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("SCANGATE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_load_config_defaults() {
        // Without any config file or env vars, should return defaults
        let config = load_config().expect("should load with defaults");

        assert_eq!(config.api.hostname, "app.brightsec.com");
        assert_eq!(config.api.token, None);
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.poll.interval_seconds, 20);
        assert_eq!(config.poll.timeout_seconds, 3600);
    }

    #[test]
    #[serial]
    fn test_env_overrides_hostname() {
        unsafe { std::env::set_var("SCANGATE_API__HOSTNAME", "scans.example.com") };
        let config = load_config().expect("should load with env override");
        assert_eq!(config.api.hostname, "scans.example.com");
        unsafe { std::env::remove_var("SCANGATE_API__HOSTNAME") };
    }

    #[test]
    #[serial]
    fn test_env_overrides_poll_interval() {
        unsafe { std::env::set_var("SCANGATE_POLL__INTERVAL_SECONDS", "5") };
        let config = load_config().expect("should load with env override");
        assert_eq!(config.poll.interval_seconds, 5);
        unsafe { std::env::remove_var("SCANGATE_POLL__INTERVAL_SECONDS") };
    }

    #[test]
    #[serial]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let scangate_dir = dir.path().join("scangate");
        std::fs::create_dir_all(&scangate_dir).expect("config dir");
        std::fs::write(
            scangate_dir.join("config.toml"),
            "[api]\nhostname = \"scans.example.com\"\n\n[poll]\ninterval_seconds = 7\n",
        )
        .expect("config file");

        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };

        let config = load_config().expect("should load from file");
        assert_eq!(config.api.hostname, "scans.example.com");
        assert_eq!(config.poll.interval_seconds, 7);
        // keys absent from the file keep their defaults
        assert_eq!(config.poll.timeout_seconds, 3600);
        assert_eq!(config.api.timeout_seconds, 30);

        match previous {
            Some(value) => unsafe { std::env::set_var("XDG_CONFIG_HOME", value) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let scangate_dir = dir.path().join("scangate");
        std::fs::create_dir_all(&scangate_dir).expect("config dir");
        std::fs::write(
            scangate_dir.join("config.toml"),
            "[api]\nhostname = \"from-file.example.com\"\n",
        )
        .expect("config file");

        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };
        unsafe { std::env::set_var("SCANGATE_API__HOSTNAME", "from-env.example.com") };

        let config = load_config().expect("should load with env over file");
        assert_eq!(config.api.hostname, "from-env.example.com");

        unsafe { std::env::remove_var("SCANGATE_API__HOSTNAME") };
        match previous {
            Some(value) => unsafe { std::env::set_var("XDG_CONFIG_HOME", value) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
    }

    #[test]
    fn test_config_dir_name() {
        let dir = config_dir();
        assert!(dir.ends_with("scangate"));
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with("config.toml"));
    }
}
