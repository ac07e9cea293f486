// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! This module provides a formatting layer that downcasts `anyhow::Error` to
//! `ScangateError` and adds hints for the common failure modes. This keeps
//! structured error data (library) separate from user-friendly presentation
//! (CLI).

use anyhow::Error;
use scangate_core::ScangateError;

/// Formats an error for CLI display with helpful hints.
///
/// Downcasts `anyhow::Error` to `ScangateError` and adds a hint per variant.
/// If the error is not a `ScangateError`, returns the original error message.
///
/// # Arguments
///
/// * `error` - The error to format
///
/// # Returns
///
/// A formatted error message with hints
#[must_use]
pub fn format_error(error: &Error) -> String {
    if let Some(gate_err) = error.downcast_ref::<ScangateError>() {
        match gate_err {
            ScangateError::Timeout { waited_secs } => {
                format!(
                    "Polling timed out after {waited_secs}s\n\n\
                     Tip: The scan did not finish within the deadline. Raise --timeout, or \
                     lower --wait-for so the gate trips earlier."
                )
            }
            ScangateError::MissingToken => format!(
                "{gate_err}\n\nTip: Create an API key in the scan engine's organization settings."
            ),
            ScangateError::Api { status, message: _ } => {
                if *status == 401 || *status == 403 {
                    format!("{gate_err}\n\nTip: Check that your API token is valid and has scan access.")
                } else if *status == 404 {
                    format!("{gate_err}\n\nTip: Check the scan id and --hostname.")
                } else {
                    format!("{gate_err}\n\nTip: The scan engine rejected the request. Try again in a moment.")
                }
            }
            ScangateError::Network(_) => {
                format!("{gate_err}\n\nTip: Check your internet connection and try again.")
            }
            ScangateError::Config { message: _ } => {
                format!(
                    "{gate_err}\n\nTip: Check your config file at {}",
                    scangate_core::config_file_path().display()
                )
            }
            ScangateError::InvalidInterval => {
                format!("{gate_err}\n\nTip: Pass --interval with a value of 1 or more.")
            }
            ScangateError::EmptyReport => {
                format!(
                    "{gate_err}\n\nTip: The scan may not have produced findings yet. \
                     Retry once the scan reports issues."
                )
            }
            ScangateError::MissingRepository => {
                format!(
                    "{gate_err}\n\nTip: Set GITHUB_REPOSITORY to owner/repo, or run inside \
                     GitHub Actions where it is set automatically."
                )
            }
        }
    } else {
        // Not a ScangateError, return the original error chain
        error.to_string()
    }
}
