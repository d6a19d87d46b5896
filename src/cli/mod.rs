//! CLI command handling
//!
//! Bridges the clap argument model with configuration loading, the
//! providers and the budget check.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::paths::{self, CONFIG_ENV_VAR};
use crate::config::Config;
use crate::error::WranglerResult;
use crate::providers::{CliParameters, OutputFormat, Providers};
use crate::services::check_budgets;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    name = "wrangler",
    version,
    about = "Wrangler is a command line tool for cost management.",
    long_about = "Wrangler reads cost records from stdin as CSV \
                  (timestamp,resource_id,period,value[,currency[,category]]), \
                  checks them against the budgets and rules in its configuration \
                  file and reports every rule violation."
)]
pub struct Cli {
    /// Configuration file (defaults to ./.wrangler.yaml)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Disable reading data from stdin
    #[arg(long = "no-stdin")]
    pub no_stdin: bool,

    /// Console output format for violations
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve provider parameters, applying the default config path
    pub fn parameters(&self) -> WranglerResult<CliParameters> {
        let config_file = match &self.config {
            Some(path) => path.clone(),
            None => paths::default_config_file()?,
        };

        Ok(CliParameters {
            config_file,
            output_format: self.output,
            disable_stdin: self.no_stdin,
        })
    }
}

/// Result of a completed check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No rule was violated
    Clean,
    /// This many violations were found and reported
    Violations(usize),
}

/// Load configuration, assemble the providers and run the check
pub fn run_check(cli: &Cli) -> WranglerResult<CheckOutcome> {
    let params = cli.parameters()?;

    info!("Reading configuration...");
    let config = Config::load(&params.config_file)?;

    let providers = Providers::from_config(&params, &config);
    run_with(&config, &providers, &params)
}

/// Run the check with an explicit provider set
pub fn run_with(
    config: &Config,
    providers: &Providers,
    params: &CliParameters,
) -> WranglerResult<CheckOutcome> {
    let records = providers.collect_records(params)?;

    info!("Evaluating {} record(s)...", records.len());
    let violations = check_budgets(&records, config)?;

    if violations.is_empty() {
        info!("Check complete.");
        return Ok(CheckOutcome::Clean);
    }

    info!("{} violation(s) found", violations.len());
    providers.dispatch(&violations)?;
    Ok(CheckOutcome::Violations(violations.len()))
}
