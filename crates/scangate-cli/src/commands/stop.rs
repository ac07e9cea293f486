// SPDX-License-Identifier: Apache-2.0

//! The `stop` command: request that a scan be stopped.

use anyhow::Result;
use scangate_core::AppConfig;

/// Sends a stop request for the scan.
pub async fn run(scan_id: &str, config: &AppConfig) -> Result<()> {
    let client = super::scan_client(config)?;
    client.stop(scan_id).await?;
    println!("Stop requested for scan {scan_id}.");
    Ok(())
}
