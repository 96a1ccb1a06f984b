//! SR Triage Control - CLI client for SR Triage
//!
//! Classifies locally or talks to srtriaged over HTTP.

use clap::Parser;
use srtriagectl::cli::Cli;
use srtriagectl::{commands, errors, output};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Warnings only, on stderr, so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let code = match commands::run(cli).await {
        Ok(()) => errors::EXIT_SUCCESS,
        Err(e) => {
            output::display_error(&format!("{:#}", e));
            errors::exit_code_for(&e)
        }
    };
    std::process::exit(code);
}
