// SPDX-License-Identifier: Apache-2.0

//! Scangate - severity-gated waiting on DAST security scans.
//!
//! A CLI tool that polls a running security scan and gates CI on a severity
//! threshold: the process exits non-zero when qualifying issues are found,
//! when the scan fails, or when the deadline expires.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use scangate_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.output, cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    let mut config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    // Apply CLI overrides to config
    if let Some(hostname) = &cli.hostname {
        config.api.hostname.clone_from(hostname);
        debug!("Overriding scan engine hostname to: {hostname}");
    }

    if let Some(token) = &cli.token {
        config.api.token = Some(token.clone());
        debug!("Using API token from command line");
    }

    match commands::run(cli.command, output_ctx, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            Err(e)
        }
    }
}
