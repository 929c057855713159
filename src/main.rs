// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! formcheck - Form validation orchestrator

use clap::Parser;
use formcheck::cli::{run, Cli};
use formcheck::error::{FieldError, FormError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit status for a form that failed validation.
const EXIT_INVALID: i32 = 1;
/// Exit status for configuration, engine or input errors.
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    match run(cli) {
        Ok(()) => {}
        // The report already lists the failing fields.
        Err(FormError::Field(FieldError::Failed { count })) => {
            tracing::debug!("Form rejected with {} errors", count);
            std::process::exit(EXIT_INVALID);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Build the log filter: `--debug`, then `FORMCHECK_LOG`, then `RUST_LOG`.
fn log_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("formcheck=debug,warn");
    }

    std::env::var("FORMCHECK_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Send logs to stderr, keeping stdout for the report. Timestamps are
/// only shown with `--debug`.
fn setup_logging(debug: bool) {
    let timed = debug.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });
    let plain = (!debug).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(log_filter(debug))
        .with(timed)
        .with(plain)
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
