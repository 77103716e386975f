//! Entry point for the `locale-sync` validator.

use std::process::ExitCode;

use clap::Parser;
use locale_sync::cli::{
    Cli,
    run,
};
use tracing_subscriber::EnvFilter;

/// Runs the validator and maps the outcome to the process exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(&cli, &mut std::io::stdout().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
