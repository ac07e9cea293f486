// SPDX-License-Identifier: Apache-2.0

//! The `status` command: one-shot scan state summary.

use anyhow::Result;
use scangate_core::{AppConfig, StatusSource};

use crate::cli::OutputContext;
use crate::output;

/// Fetches the scan's state once and prints a categorized summary.
pub async fn run(scan_id: &str, ctx: OutputContext, config: &AppConfig) -> Result<()> {
    let client = super::scan_client(config)?;
    let state = client.status(scan_id).await?;
    output::render_status(scan_id, &state, &ctx)
}
