// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the scangate CLI.

pub mod status;
pub mod stop;
pub mod wait;

use std::time::Duration;

use anyhow::Result;
use scangate_core::{AppConfig, ScanClient, ScangateError};
use secrecy::SecretString;

use crate::cli::{Commands, OutputContext};

/// Builds the scan API client from the resolved configuration.
///
/// The token must already be resolved into the config (CLI flag, environment,
/// or config file); there is no interactive fallback.
fn scan_client(config: &AppConfig) -> Result<ScanClient> {
    let token = config
        .api
        .token
        .clone()
        .ok_or(ScangateError::MissingToken)?;

    ScanClient::new(
        &config.api.hostname,
        SecretString::new(token.into()),
        Duration::from_secs(config.api.timeout_seconds),
    )
}

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: OutputContext, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Wait {
            scan_id,
            wait_for,
            timeout,
            interval,
            stop_scan,
            code_scanning_alerts,
            git_ref,
            commit_sha,
            github_token,
        } => {
            wait::run(
                wait::WaitArgs {
                    scan_id,
                    wait_for,
                    timeout,
                    interval,
                    stop_scan,
                    code_scanning_alerts,
                    git_ref,
                    commit_sha,
                    github_token,
                },
                ctx,
                config,
            )
            .await
        }

        Commands::Status { scan_id } => status::run(&scan_id, ctx, config).await,

        Commands::Stop { scan_id } => stop::run(&scan_id, config).await,
    }
}
