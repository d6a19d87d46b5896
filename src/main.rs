use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use wrangler::cli::{run_check, CheckOutcome, Cli};
use wrangler::logging;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run_check(&cli).context("Budget check failed")? {
        CheckOutcome::Clean => Ok(ExitCode::SUCCESS),
        CheckOutcome::Violations(count) => {
            error!("Failed with {} violation(s)", count);
            Ok(ExitCode::FAILURE)
        }
    }
}
