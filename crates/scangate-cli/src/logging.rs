// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the scangate CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings only
//! scangate wait <scan-id>
//!
//! # Debug output for troubleshooting (poll attempts, retry decisions)
//! RUST_LOG=scangate_core=debug scangate wait <scan-id>
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::OutputFormat;

/// Initialize the logging subsystem.
///
/// The `verbose` flag raises the default filter to debug for scangate
/// targets. Structured output formats keep the default quiet so stdout stays
/// machine-parseable; all log lines go to stderr either way.
///
/// # Arguments
///
/// * `format` - Output format (structured formats stay quiet)
/// * `verbose` - Whether verbose output is enabled (-v flag)
pub fn init_logging(format: OutputFormat, verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose && !matches!(format, OutputFormat::Json) {
        "scangate_core=debug,scangate_cli=debug,reqwest=warn"
    } else {
        "scangate_core=warn,scangate_cli=warn,reqwest=error"
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
