//! Wrangler - command line cost management
//!
//! This library checks period-scoped cost records against configured (or
//! baseline-inferred) budgets and a set of comparison rules, producing a
//! list of rule violations for reporting.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration file loading and path resolution
//! - `error`: Custom error types
//! - `models`: Budgets, rules, cost records and violations
//! - `services`: Budget resolution and rule evaluation
//! - `providers`: Cost data sources and violation sinks
//! - `display`: Terminal formatting
//! - `cli`: Command line arguments and the check run
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use wrangler::config::Config;
//! use wrangler::services::check_budgets;
//!
//! let config = Config::load(Path::new(".wrangler.yaml"))?;
//! let violations = check_budgets(&records, &config)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod services;

pub use error::{WranglerError, WranglerResult};
