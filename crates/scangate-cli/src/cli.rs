// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for scangate.
//!
//! Uses clap's derive API for declarative CLI parsing. One verb per scan
//! operation: `wait` (the gate itself), `status` (one-shot summary), and
//! `stop`.

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
}

/// Global output configuration passed to commands.
#[derive(Clone, Copy)]
pub struct OutputContext {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Enable verbose output (debug-level logging)
    pub verbose: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    #[must_use]
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
        }
    }
}

/// Scangate - severity-gated waiting on DAST security scans.
///
/// Polls a running scan until it finishes, breaches a severity threshold, or
/// a deadline expires, and signals the result through its exit code.
#[derive(Parser)]
#[command(name = "scangate")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Scan API key (overrides SCANGATE_API__TOKEN and the config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Scan engine hostname, without scheme (e.g. app.brightsec.com)
    #[arg(long, global = true)]
    pub hostname: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Wait for a scan, gating on a severity threshold
    Wait {
        /// Scan id to wait for
        scan_id: String,

        /// Minimum severity that fails the gate (low, medium, high,
        /// critical). Any other value disables the check.
        #[arg(long)]
        wait_for: Option<String>,

        /// Total wait deadline in seconds (0 = probe exactly once)
        #[arg(long)]
        timeout: Option<u64>,

        /// Delay between status probes in seconds
        #[arg(long)]
        interval: Option<u64>,

        /// Request a scan stop when the gate trips
        #[arg(long)]
        stop_scan: bool,

        /// Upload the scan's SARIF report to GitHub code scanning when the
        /// gate trips
        #[arg(long)]
        code_scanning_alerts: bool,

        /// Git ref the SARIF upload applies to (falls back to GITHUB_REF)
        #[arg(long = "ref")]
        git_ref: Option<String>,

        /// Commit the SARIF upload applies to (falls back to GITHUB_SHA)
        #[arg(long)]
        commit_sha: Option<String>,

        /// GitHub token for the SARIF upload (falls back to GITHUB_TOKEN)
        #[arg(long)]
        github_token: Option<String>,
    },

    /// Fetch a scan's state once and print a categorized issue summary
    Status {
        /// Scan id to inspect
        scan_id: String,
    },

    /// Request that a scan be stopped
    Stop {
        /// Scan id to stop
        scan_id: String,
    },
}
