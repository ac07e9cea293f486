// SPDX-License-Identifier: Apache-2.0

//! Cancellable, deadline-bounded polling over an asynchronous probe.
//!
//! [`poll`] repeatedly drives a [`Probe`] until it reports a terminal outcome
//! or the session deadline expires. Exactly one probe is in flight at a time
//! and outcomes are observed strictly in invocation order; the sleep between
//! probes is the only suspension point the poller introduces.
//!
//! The deadline bounds the polling session, not individual probe latency: the
//! deadline is checked after a probe reports "not done", so a slow probe is
//! always allowed to finish and a last-moment success is honored. Probe
//! failures are never retried here; a failing probe terminates the session
//! immediately and cleanup (for example stopping the remote operation) is the
//! caller's concern.

use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::error::ScangateError;

/// Result of a single probe invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome<T> {
    /// Whether the poll session should terminate with `data`.
    pub done: bool,
    /// Payload observed by this invocation.
    pub data: T,
}

impl<T> PollOutcome<T> {
    /// An outcome that terminates the session.
    pub fn done(data: T) -> Self {
        Self { done: true, data }
    }

    /// An outcome that schedules another attempt.
    pub fn pending(data: T) -> Self {
        Self { done: false, data }
    }
}

/// Timing parameters for one poll session. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    timeout: Duration,
}

impl PollConfig {
    /// Creates a poll configuration.
    ///
    /// A zero `timeout` selects single-shot mode: the probe runs exactly once
    /// and its data is returned regardless of `done`.
    ///
    /// # Errors
    ///
    /// Returns [`ScangateError::InvalidInterval`] if `interval` is zero.
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self, ScangateError> {
        if interval.is_zero() {
            return Err(ScangateError::InvalidInterval);
        }
        Ok(Self { interval, timeout })
    }

    /// Delay between consecutive probe invocations.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total session deadline. Zero means single-shot mode.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// One asynchronous probe invoked once per polling cycle.
///
/// Implementations perform whatever I/O they need and report, via
/// [`PollOutcome`], whether the session should terminate with the observed
/// payload.
#[async_trait]
pub trait Probe {
    /// Payload type carried by each outcome.
    type Output: Send;

    /// Runs one probe attempt.
    ///
    /// # Errors
    ///
    /// Any error terminates the poll session and is propagated unchanged to
    /// the caller of [`poll`].
    async fn run(&mut self) -> Result<PollOutcome<Self::Output>>;
}

/// Drives `probe` until it reports `done`, it fails, or the deadline expires.
///
/// Step order per cycle is probe, then deadline check, then sleep. The order
/// is load-bearing: a probe that reports `done` exactly at the deadline still
/// resolves the session, and the first probe always runs to completion even
/// if it alone outlives the timeout.
///
/// # Errors
///
/// - [`ScangateError::Timeout`] once the deadline has passed with no terminal
///   outcome.
/// - Any probe error, propagated unchanged after the attempt that raised it.
pub async fn poll<P>(probe: &mut P, poll_config: &PollConfig) -> Result<P::Output>
where
    P: Probe + Send,
{
    let started = Instant::now();
    let deadline = started + poll_config.timeout();
    let single_shot = poll_config.timeout().is_zero();

    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        let outcome = probe.run().await?;

        if outcome.done || single_shot {
            debug!(attempt, "poll session resolved");
            return Ok(outcome.data);
        }

        if Instant::now() >= deadline {
            let waited_secs = started.elapsed().as_secs();
            debug!(attempt, waited_secs, "poll session timed out");
            return Err(ScangateError::Timeout { waited_secs }.into());
        }

        tokio::time::sleep(poll_config.interval()).await;
    }
}
