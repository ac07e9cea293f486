// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Scangate Core
//!
//! Core library for the scangate CLI - severity-gated waiting on DAST
//! security scans.
//!
//! This crate provides reusable components for:
//! - Deadline-bounded polling over asynchronous probes
//! - Severity-threshold evaluation of scan issue counters
//! - Scan API integration (status, stop, SARIF report)
//! - SARIF upload to GitHub code scanning
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use scangate_core::{PollConfig, ScanClient, Threshold, Verdict, load_config, watch};
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config()?;
//! let client = ScanClient::new(
//!     &config.api.hostname,
//!     SecretString::new("api-key".to_string().into()),
//!     Duration::from_secs(config.api.timeout_seconds),
//! )?;
//!
//! let poll_config = PollConfig::new(
//!     Duration::from_secs(config.poll.interval_seconds),
//!     Duration::from_secs(config.poll.timeout_seconds),
//! )?;
//!
//! match watch(&client, "scan-id", Threshold::parse("high"), &poll_config).await? {
//!     Verdict::ThresholdBreached { counts, .. } => println!("{} issues", counts.total()),
//!     verdict => println!("{verdict:?}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`poller`] - Generic deadline-bounded polling primitive
//! - [`severity`] - Severity scale and threshold parsing
//! - [`issues`] - Issue counters and the threshold predicate
//! - [`scan`] - Scan API client and status payloads
//! - [`watch`] - Composition of poller and threshold engine
//! - [`report`] - SARIF upload to GitHub code scanning
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`retry`] - Backoff helpers for transient failures

// ============================================================================
// Error Handling
// ============================================================================

pub use error::ScangateError;

// ============================================================================
// Polling
// ============================================================================

pub use poller::{PollConfig, PollOutcome, Probe, poll};

// ============================================================================
// Severity & Issues
// ============================================================================

pub use issues::{IssueCounts, categorize};
pub use severity::{SEVERITY_LEVELS, Severity, Threshold};

// ============================================================================
// Scan API
// ============================================================================

pub use scan::{DEFAULT_HOSTNAME, ScanClient, ScanState, ScanStatus, StatusSource};

// ============================================================================
// Watching
// ============================================================================

pub use watch::{Verdict, watch};

// ============================================================================
// Reporting
// ============================================================================

pub use report::{CodeScanningClient, RepoTarget, TOOL_NAME};

// ============================================================================
// Configuration
// ============================================================================

pub use config::{ApiConfig, AppConfig, PollSettings, config_dir, config_file_path, load_config};

// ============================================================================
// Retry Logic
// ============================================================================

pub use retry::{is_retryable_anyhow, is_retryable_http, retry_backoff};

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod issues;
pub mod poller;
pub mod report;
pub mod retry;
pub mod scan;
pub mod severity;
pub mod watch;
