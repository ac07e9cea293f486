// SPDX-License-Identifier: Apache-2.0

//! Watches a scan until it finishes, breaches the severity gate, or the
//! session deadline expires.
//!
//! This is the composition layer: it builds a [`Probe`] over a
//! [`StatusSource`] and runs it through the [`poller`](crate::poller). Each
//! probe fetches the scan state once, checks the severity threshold first,
//! then classifies the raw status. The threshold check deliberately takes
//! priority over the status: a breached gate is reported even while the scan
//! is still nominally running, and even when the same observation carries a
//! terminal status.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::issues::IssueCounts;
use crate::poller::{PollConfig, PollOutcome, Probe, poll};
use crate::scan::{ScanStatus, StatusSource};
use crate::severity::Threshold;

/// Terminal observation of a watched scan.
///
/// Timeouts and status-fetch failures are not verdicts; they surface as
/// errors from [`watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// An issue at or above the configured threshold was found.
    ThresholdBreached {
        /// Status the scan had when the breach was observed.
        status: ScanStatus,
        /// Counters at the moment of the breach, for reporting.
        counts: IssueCounts,
    },
    /// The scan ended in an engine-side failure (`failed` or `disrupted`).
    ScanFailed(ScanStatus),
    /// The scan ended without breaching the gate (`done` or `stopped`).
    ScanFinished(ScanStatus),
    /// The scan was still in progress when observation ended. Only produced
    /// by single-shot sessions (zero timeout).
    StillRunning(ScanStatus),
}

/// Probe that classifies one scan observation per polling cycle.
struct GateProbe<'a, S> {
    source: &'a S,
    scan_id: &'a str,
    threshold: Threshold,
}

#[async_trait]
impl<S> Probe for GateProbe<'_, S>
where
    S: StatusSource + Sync,
{
    type Output = Verdict;

    async fn run(&mut self) -> Result<PollOutcome<Verdict>> {
        let state = self.source.status(self.scan_id).await?;

        // Threshold first: a breach terminates the watch regardless of status.
        if self.threshold.is_satisfied(&state.issues) {
            debug!(scan_id = self.scan_id, threshold = %self.threshold, "severity gate breached");
            return Ok(PollOutcome::done(Verdict::ThresholdBreached {
                status: state.status,
                counts: state.issues,
            }));
        }

        let outcome = match state.status {
            status if status.is_failure() => PollOutcome::done(Verdict::ScanFailed(status)),
            ScanStatus::Done | ScanStatus::Stopped => {
                PollOutcome::done(Verdict::ScanFinished(state.status))
            }
            status => PollOutcome::pending(Verdict::StillRunning(status)),
        };
        Ok(outcome)
    }
}

/// Polls `source` for the scan's state until a [`Verdict`] is reached.
///
/// # Errors
///
/// - [`ScangateError::Timeout`](crate::error::ScangateError::Timeout) when
///   the deadline expires with the scan still in progress.
/// - Any status fetch error, propagated unchanged; the watcher performs no
///   retries of its own above the [`StatusSource`].
pub async fn watch<S>(
    source: &S,
    scan_id: &str,
    threshold: Threshold,
    poll_config: &PollConfig,
) -> Result<Verdict>
where
    S: StatusSource + Sync,
{
    let mut probe = GateProbe {
        source,
        scan_id,
        threshold,
    };
    poll(&mut probe, poll_config).await
}
