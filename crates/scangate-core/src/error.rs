// SPDX-License-Identifier: Apache-2.0

//! Error types for scangate.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur during scangate operations.
#[derive(Error, Debug)]
pub enum ScangateError {
    /// The polling session exhausted its deadline without a terminal outcome.
    #[error("Polling timed out after {waited_secs}s")]
    Timeout {
        /// Seconds the poll session waited before giving up.
        waited_secs: u64,
    },

    /// A poll session was configured with a zero-length interval.
    #[error("Poll interval must be greater than zero")]
    InvalidInterval,

    /// The scan API returned a non-success status code.
    #[error("Scan API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// The scan API returned an empty SARIF report body.
    #[error("Cannot upload a report to GitHub: SARIF report is empty")]
    EmptyReport,

    /// No API token was provided via flag, environment, or config file.
    #[error("API token required - pass --token or set SCANGATE_API__TOKEN")]
    MissingToken,

    /// `GITHUB_REPOSITORY` is not set, so the upload target is unknown.
    #[error("GITHUB_REPOSITORY environment variable must be set to upload SARIF")]
    MissingRepository,
}

impl From<config::ConfigError> for ScangateError {
    fn from(err: config::ConfigError) -> Self {
        ScangateError::Config {
            message: err.to_string(),
        }
    }
}
