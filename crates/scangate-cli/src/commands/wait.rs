// SPDX-License-Identifier: Apache-2.0

//! The `wait` command: the severity gate itself.
//!
//! Watches the scan until a verdict is reached, then translates the verdict
//! into user output and an exit code. A tripped gate and an engine-side
//! failure both exit non-zero; a clean finish exits zero. On timeout or a
//! status fetch failure a best-effort stop request is issued before the error
//! surfaces, so the remote scan does not keep running unattended.

use std::time::Duration;

use anyhow::{Context, Result};
use scangate_core::{
    AppConfig, CodeScanningClient, PollConfig, RepoTarget, ScanClient, Threshold, Verdict, watch,
};
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::cli::OutputContext;
use crate::output;

/// Arguments of the `wait` command.
pub struct WaitArgs {
    /// Scan id to wait for.
    pub scan_id: String,
    /// Raw threshold string from the user, if any.
    pub wait_for: Option<String>,
    /// Deadline override in seconds.
    pub timeout: Option<u64>,
    /// Probe interval override in seconds.
    pub interval: Option<u64>,
    /// Stop the scan when the gate trips.
    pub stop_scan: bool,
    /// Upload SARIF to GitHub code scanning when the gate trips.
    pub code_scanning_alerts: bool,
    /// Git ref for the SARIF upload.
    pub git_ref: Option<String>,
    /// Commit sha for the SARIF upload.
    pub commit_sha: Option<String>,
    /// GitHub token for the SARIF upload.
    pub github_token: Option<String>,
}

/// Resolves the threshold string, warning when fail-open kicks in.
///
/// An absent or unrecognized value disables the severity check entirely; the
/// scan is then only watched for terminal status. This is deliberate
/// misconfiguration tolerance, not an error path.
fn resolve_threshold(wait_for: Option<&str>) -> Threshold {
    match wait_for {
        None => Threshold::Disabled,
        Some(raw) => {
            let threshold = Threshold::parse(raw);
            if threshold == Threshold::Disabled && !raw.is_empty() {
                warn!(value = raw, "unrecognized severity, severity check disabled");
            }
            threshold
        }
    }
}

/// Runs the wait command.
pub async fn run(args: WaitArgs, ctx: OutputContext, config: &AppConfig) -> Result<()> {
    let client = super::scan_client(config)?;
    let threshold = resolve_threshold(args.wait_for.as_deref());

    let interval = args.interval.unwrap_or(config.poll.interval_seconds);
    let timeout = args.timeout.unwrap_or(config.poll.timeout_seconds);
    let poll_config = PollConfig::new(
        Duration::from_secs(interval),
        Duration::from_secs(timeout),
    )?;

    let url = client.scan_url(&args.scan_id);
    debug!(scan_id = %args.scan_id, %threshold, interval, timeout, "watching scan");
    if ctx.verbose && !ctx.quiet {
        println!("Waiting for scan {} (threshold: {threshold})", args.scan_id);
    }

    match watch(&client, &args.scan_id, threshold, &poll_config).await {
        Ok(Verdict::ThresholdBreached { counts, .. }) => {
            output::render_found_issues(&counts, &ctx);

            if args.code_scanning_alerts
                && let Err(err) = upload_sarif(&client, &args, config).await
            {
                warn!(error = %err, "cannot upload SARIF report");
            }

            if args.stop_scan
                && let Err(err) = client.stop(&args.scan_id).await
            {
                warn!(error = %err, "failed to stop scan after gate tripped");
            }

            anyhow::bail!("Issues were found. See on {url}")
        }

        Ok(Verdict::ScanFailed(status)) => {
            anyhow::bail!("Scan {status}. See on {url}")
        }

        Ok(Verdict::ScanFinished(status)) => {
            if !ctx.quiet {
                println!("Scan {status}. See on {url}");
            }
            Ok(())
        }

        Ok(Verdict::StillRunning(status)) => {
            // single-shot mode observed an in-progress scan and no breach
            if !ctx.quiet {
                println!("Scan still {status}. See on {url}");
            }
            Ok(())
        }

        Err(err) => {
            // the remote scan may still be running; try not to leave it behind
            if let Err(stop_err) = client.stop(&args.scan_id).await {
                warn!(error = %stop_err, "failed to stop scan after poll failure");
            }
            Err(err)
        }
    }
}

/// Downloads the SARIF report and uploads it to GitHub code scanning.
async fn upload_sarif(client: &ScanClient, args: &WaitArgs, config: &AppConfig) -> Result<()> {
    let github_token = args
        .github_token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .context("GitHub token required - pass --github-token or set GITHUB_TOKEN")?;
    let git_ref = args
        .git_ref
        .clone()
        .or_else(|| std::env::var("GITHUB_REF").ok())
        .context("Git ref required - pass --ref or set GITHUB_REF")?;
    let commit_sha = args
        .commit_sha
        .clone()
        .or_else(|| std::env::var("GITHUB_SHA").ok())
        .context("Commit sha required - pass --commit-sha or set GITHUB_SHA")?;

    let target = RepoTarget::from_env()?;
    let sarif = client.sarif_report(&args.scan_id).await?;

    let uploader = CodeScanningClient::new(
        SecretString::new(github_token.into()),
        Duration::from_secs(config.api.timeout_seconds),
    )?;
    uploader.upload(&target, &git_ref, &commit_sha, &sarif).await
}

#[cfg(test)]
mod tests {
    use scangate_core::Severity;

    use super::*;

    #[test]
    fn test_resolve_threshold_known_level() {
        assert_eq!(
            resolve_threshold(Some("high")),
            Threshold::Level(Severity::High)
        );
        assert_eq!(
            resolve_threshold(Some("Critical")),
            Threshold::Level(Severity::Critical)
        );
    }

    #[test]
    fn test_resolve_threshold_unknown_disables() {
        assert_eq!(resolve_threshold(Some("bogus")), Threshold::Disabled);
        assert_eq!(resolve_threshold(Some("")), Threshold::Disabled);
    }

    #[test]
    fn test_resolve_threshold_absent_disables() {
        assert_eq!(resolve_threshold(None), Threshold::Disabled);
    }
}
