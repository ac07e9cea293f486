// SPDX-License-Identifier: Apache-2.0

//! Rendering of scan state and verdicts for the terminal.
//!
//! Text output goes line-per-severity in ascending order so repeated runs
//! over the same scan diff cleanly; JSON output is a single object on stdout.

use anyhow::Result;
use scangate_core::{ScanState, ScanStatus, Severity, categorize};
use serde::Serialize;

use crate::cli::{OutputContext, OutputFormat};

/// One severity bucket in a status report.
#[derive(Debug, Serialize)]
struct SeverityCount {
    severity: Severity,
    count: u64,
}

/// JSON payload printed by the `status` command.
///
/// Issue buckets are emitted severity-ascending, matching the text output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport<'a> {
    scan_id: &'a str,
    status: ScanStatus,
    issues: Vec<SeverityCount>,
}

impl<'a> StatusReport<'a> {
    fn new(scan_id: &'a str, state: &ScanState) -> Self {
        Self {
            scan_id,
            status: state.status,
            issues: categorize(&state.issues)
                .into_iter()
                .map(|(severity, count)| SeverityCount { severity, count })
                .collect(),
        }
    }
}

/// Renders a one-shot scan state summary.
pub fn render_status(scan_id: &str, state: &ScanState, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let report = StatusReport::new(scan_id, state);
            println!("{}", serde_json::to_string(&report)?);
        }
        OutputFormat::Text => {
            println!("Scan {scan_id}: {}", state.status);
            for (severity, count) in categorize(&state.issues) {
                println!("{count} {severity} issues");
            }
        }
    }
    Ok(())
}

/// Prints the per-severity breakdown for a tripped gate.
pub fn render_found_issues(state_issues: &scangate_core::IssueCounts, ctx: &OutputContext) {
    if ctx.quiet {
        return;
    }
    println!("Issues were found:");
    for (severity, count) in categorize(state_issues) {
        println!("{count} {severity} issues");
    }
}
