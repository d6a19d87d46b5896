//! Data and alert providers
//!
//! Data providers supply cost records; alert providers deliver violations.
//! The set of providers for a run is assembled explicitly by [`Providers`]
//! and handed to the check, in the order they should run.

pub mod console;
pub mod data;
pub mod msteams;

use std::path::PathBuf;

use clap::ValueEnum;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::WranglerResult;
use crate::models::{BudgetRuleViolation, CostRecord};

pub use console::ConsoleAlertService;
pub use data::CliCostDataProvider;
pub use msteams::MsTeamsAlertService;

/// Console output format for violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Bordered table
    #[default]
    Table,
    /// JSON array
    Json,
}

/// Parameters from the command line that providers may act on
#[derive(Debug, Clone, Default)]
pub struct CliParameters {
    pub config_file: PathBuf,
    pub output_format: OutputFormat,
    pub disable_stdin: bool,
}

/// A source of cost records
pub trait CostDataProvider {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Fetch cost records
    fn get_data(&self, params: &CliParameters) -> WranglerResult<Vec<CostRecord>>;
}

/// A sink for budget rule violations
pub trait BudgetAlertService {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Deliver a batch of violations
    fn handle_violations(&self, violations: &[BudgetRuleViolation]) -> WranglerResult<()>;
}

/// The ordered data and alert providers for one run
#[derive(Default)]
pub struct Providers {
    pub data: Vec<Box<dyn CostDataProvider>>,
    pub alerts: Vec<Box<dyn BudgetAlertService>>,
}

impl Providers {
    /// Create an empty provider set
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the standard providers for a run
    ///
    /// Records come from stdin; violations go to the console and, when a
    /// webhook is configured, to MS Teams.
    pub fn from_config(params: &CliParameters, config: &Config) -> Self {
        let mut providers = Self::new()
            .with_data(CliCostDataProvider)
            .with_alert(ConsoleAlertService::new(params.output_format));

        if let Some(url) = config.msteams_webhook_url() {
            providers = providers.with_alert(MsTeamsAlertService::new(url));
        }

        providers
    }

    /// Append a data provider
    pub fn with_data(mut self, provider: impl CostDataProvider + 'static) -> Self {
        self.data.push(Box::new(provider));
        self
    }

    /// Append an alert provider
    pub fn with_alert(mut self, provider: impl BudgetAlertService + 'static) -> Self {
        self.alerts.push(Box::new(provider));
        self
    }

    /// Collect records from every data provider, in provider order
    pub fn collect_records(&self, params: &CliParameters) -> WranglerResult<Vec<CostRecord>> {
        let mut records = Vec::new();
        for provider in &self.data {
            let data = provider.get_data(params)?;
            debug!(provider = provider.name(), count = data.len(), "Provider returned records");
            records.extend(data);
        }
        Ok(records)
    }

    /// Hand violations to every alert provider, in provider order
    pub fn dispatch(&self, violations: &[BudgetRuleViolation]) -> WranglerResult<()> {
        for provider in &self.alerts {
            info!(provider = provider.name(), "Sending violations");
            provider.handle_violations(violations)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WranglerError;
    use crate::models::Period;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct StaticData(Vec<CostRecord>);

    impl CostDataProvider for StaticData {
        fn name(&self) -> &'static str {
            "static"
        }

        fn get_data(&self, _params: &CliParameters) -> WranglerResult<Vec<CostRecord>> {
            Ok(self.0.clone())
        }
    }

    struct FailingData;

    impl CostDataProvider for FailingData {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn get_data(&self, _params: &CliParameters) -> WranglerResult<Vec<CostRecord>> {
            Err(WranglerError::DataProvider {
                provider: "failing",
                message: "unavailable".into(),
            })
        }
    }

    struct Recorder(Rc<RefCell<Vec<String>>>, &'static str);

    impl BudgetAlertService for Recorder {
        fn name(&self) -> &'static str {
            self.1
        }

        fn handle_violations(&self, violations: &[BudgetRuleViolation]) -> WranglerResult<()> {
            self.0
                .borrow_mut()
                .push(format!("{}:{}", self.1, violations.len()));
            Ok(())
        }
    }

    #[test]
    fn test_collect_records_in_provider_order() {
        let providers = Providers::new()
            .with_data(StaticData(vec![CostRecord::new("a", Period::Monthly, 1.0)]))
            .with_data(StaticData(vec![
                CostRecord::new("b", Period::Monthly, 1.0),
                CostRecord::new("c", Period::Daily, 1.0),
            ]));

        let records = providers.collect_records(&CliParameters::default()).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.resource_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_collect_records_propagates_failure() {
        let providers = Providers::new()
            .with_data(StaticData(vec![]))
            .with_data(FailingData);
        let err = providers
            .collect_records(&CliParameters::default())
            .unwrap_err();
        assert!(matches!(err, WranglerError::DataProvider { provider: "failing", .. }));
    }

    #[test]
    fn test_dispatch_in_provider_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let providers = Providers::new()
            .with_alert(Recorder(log.clone(), "first"))
            .with_alert(Recorder(log.clone(), "second"));

        providers.dispatch(&[]).unwrap();
        assert_eq!(*log.borrow(), vec!["first:0", "second:0"]);
    }

    #[test]
    fn test_from_config_adds_msteams_when_configured() {
        let params = CliParameters::default();
        let providers = Providers::from_config(&params, &Config::default());
        let names: Vec<_> = providers.alerts.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["console"]);
        assert_eq!(providers.data.len(), 1);

        let mut config = Config::default();
        config.apply_env_overlay(|_| Some("https://example.invalid/hook".to_string()));
        let providers = Providers::from_config(&params, &config);
        let names: Vec<_> = providers.alerts.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["console", "msteams"]);
    }
}
