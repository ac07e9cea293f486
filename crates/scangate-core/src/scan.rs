// SPDX-License-Identifier: Apache-2.0

//! Scan API client and status payloads.
//!
//! Thin HTTP layer over the scan engine's REST API: fetch scan state, request
//! a stop, download the SARIF report. Status fetches retry transient failures
//! with exponential backoff; everything else is single-shot.

use anyhow::{Context, Result};
use async_trait::async_trait;
use backon::Retryable;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScangateError;
use crate::issues::IssueCounts;
use crate::retry::{is_retryable_anyhow, retry_backoff};

/// Default scan engine hostname.
pub const DEFAULT_HOSTNAME: &str = "app.brightsec.com";

/// Lifecycle status reported by the scan API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// Scan accepted but not yet scheduled.
    Pending,
    /// Scan waiting for an engine slot.
    Queued,
    /// Scan actively running.
    Running,
    /// Scan paused by an operator.
    Paused,
    /// Scan completed normally.
    Done,
    /// Scan stopped on request.
    Stopped,
    /// Scan failed inside the engine.
    Failed,
    /// Scan interrupted by an engine disruption.
    Disrupted,
    /// Status string this client does not recognize; treated as still running.
    #[serde(other)]
    Unknown,
}

impl ScanStatus {
    /// Whether this status ends the scan's lifecycle.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ScanStatus::Done | ScanStatus::Stopped | ScanStatus::Failed | ScanStatus::Disrupted
        )
    }

    /// Whether this status represents an engine-side failure.
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, ScanStatus::Failed | ScanStatus::Disrupted)
    }

    /// Lowercase name as used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScanStatus::Pending => "pending",
            ScanStatus::Queued => "queued",
            ScanStatus::Running => "running",
            ScanStatus::Paused => "paused",
            ScanStatus::Done => "done",
            ScanStatus::Stopped => "stopped",
            ScanStatus::Failed => "failed",
            ScanStatus::Disrupted => "disrupted",
            ScanStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation of a scan: lifecycle status plus issue counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanState {
    /// Current lifecycle status.
    pub status: ScanStatus,
    /// Issue counters bucketed by severity.
    #[serde(flatten)]
    pub issues: IssueCounts,
}

/// Source of scan state observations.
///
/// The HTTP client implements this; tests substitute scripted sources. One
/// async method keeps the polling side decoupled from transport concerns.
#[async_trait]
pub trait StatusSource {
    /// Fetches the current state of the given scan.
    ///
    /// # Errors
    ///
    /// Returns an error when the state cannot be retrieved; the caller treats
    /// this as fatal for the session (no retries above this interface).
    async fn status(&self, scan_id: &str) -> Result<ScanState>;
}

/// HTTP client for the scan engine's REST API.
#[derive(Debug, Clone)]
pub struct ScanClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl ScanClient {
    /// Creates a client for the given hostname.
    ///
    /// # Arguments
    ///
    /// * `hostname` - Scan engine hostname, without scheme (e.g.
    ///   `app.brightsec.com`)
    /// * `api_key` - API key for request authentication
    /// * `timeout` - Per-request HTTP timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(
        hostname: &str,
        api_key: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url_for(hostname),
            api_key,
        })
    }

    /// Base URL this client talks to (scheme included, no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the scan's page in the engine UI, for user-facing messages.
    #[must_use]
    pub fn scan_url(&self, scan_id: &str) -> String {
        format!("{}/scans/{scan_id}", self.base_url)
    }

    /// Requests that the scan be stopped. Best-effort from the caller's view:
    /// failures are surfaced but typically only logged.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or a non-success response.
    pub async fn stop(&self, scan_id: &str) -> Result<()> {
        let url = format!("{}/api/v1/scans/{scan_id}/stop", self.base_url);
        debug!(scan_id, "requesting scan stop");

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(ScangateError::Network)?;

        check_status(response).await?;
        Ok(())
    }

    /// Downloads the scan's SARIF report as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScangateError::EmptyReport`] if the engine responds with an
    /// empty body, or an API/network error otherwise.
    pub async fn sarif_report(&self, scan_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/api/v1/scans/{scan_id}/reports/sarif", self.base_url);
        debug!(scan_id, "downloading SARIF report");

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(ScangateError::Network)?;

        let body = check_status(response).await?.bytes().await?;
        if body.is_empty() {
            return Err(ScangateError::EmptyReport.into());
        }
        Ok(body.to_vec())
    }

    fn auth_header(&self) -> String {
        format!("api-key {}", self.api_key.expose_secret())
    }

    async fn status_once(&self, scan_id: &str) -> Result<ScanState> {
        let url = format!("{}/api/v1/scans/{scan_id}", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(ScangateError::Network)?;

        let state = check_status(response)
            .await?
            .json::<ScanState>()
            .await
            .context("Failed to decode scan state payload")?;

        debug!(scan_id, status = %state.status, "fetched scan state");
        Ok(state)
    }
}

#[async_trait]
impl StatusSource for ScanClient {
    async fn status(&self, scan_id: &str) -> Result<ScanState> {
        (|| self.status_once(scan_id))
            .retry(retry_backoff())
            .when(is_retryable_anyhow)
            .notify(|err, delay| {
                warn!(error = %err, ?delay, "transient status fetch failure, retrying");
            })
            .await
    }
}

/// Builds the base URL for a hostname, stripping any trailing slash.
fn base_url_for(hostname: &str) -> String {
    let host = if hostname.is_empty() {
        DEFAULT_HOSTNAME
    } else {
        hostname
    };
    format!("https://{}", host.trim_end_matches('/'))
}

/// Maps a non-success response to [`ScangateError::Api`] with its body text.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| status.to_string());
    Err(ScangateError::Api {
        status: status.as_u16(),
        message,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_state_deserialization() {
        let payload = r#"{
            "status": "running",
            "numberOfLowSeverityIssues": 5,
            "numberOfMediumSeverityIssues": 2,
            "numberOfHighSeverityIssues": 0,
            "numberOfCriticalSeverityIssues": 1
        }"#;

        let state: ScanState = serde_json::from_str(payload).unwrap();
        assert_eq!(state.status, ScanStatus::Running);
        assert_eq!(state.issues.number_of_low_severity_issues, 5);
        assert_eq!(state.issues.number_of_critical_severity_issues, 1);
    }

    #[test]
    fn test_scan_state_missing_counters_default_to_zero() {
        let state: ScanState = serde_json::from_str(r#"{"status": "pending"}"#).unwrap();
        assert_eq!(state.status, ScanStatus::Pending);
        assert_eq!(state.issues.number_of_high_severity_issues, 0);
    }

    #[test]
    fn test_unknown_status_is_not_terminal() {
        let state: ScanState = serde_json::from_str(r#"{"status": "searching"}"#).unwrap();
        assert_eq!(state.status, ScanStatus::Unknown);
        assert!(!state.status.is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ScanStatus::Done.is_terminal());
        assert!(ScanStatus::Stopped.is_terminal());
        assert!(ScanStatus::Failed.is_terminal());
        assert!(ScanStatus::Disrupted.is_terminal());
        assert!(!ScanStatus::Running.is_terminal());
        assert!(!ScanStatus::Pending.is_terminal());
        assert!(!ScanStatus::Queued.is_terminal());
        assert!(!ScanStatus::Paused.is_terminal());
    }

    #[test]
    fn test_failure_statuses() {
        assert!(ScanStatus::Failed.is_failure());
        assert!(ScanStatus::Disrupted.is_failure());
        assert!(!ScanStatus::Done.is_failure());
        assert!(!ScanStatus::Stopped.is_failure());
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        assert_eq!(base_url_for("scans.example.com/"), "https://scans.example.com");
        assert_eq!(base_url_for("scans.example.com"), "https://scans.example.com");
    }

    #[test]
    fn test_base_url_defaults_hostname() {
        assert_eq!(base_url_for(""), "https://app.brightsec.com");
    }

    #[test]
    fn test_scan_url() {
        let client = ScanClient::new(
            "scans.example.com",
            SecretString::new("key".to_string().into()),
            std::time::Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            client.scan_url("abc123"),
            "https://scans.example.com/scans/abc123"
        );
    }
}
