//! Console alert provider
//!
//! Prints violations to stdout as a table or as JSON.

use tracing::trace;

use super::{BudgetAlertService, OutputFormat};
use crate::display::{format_violation_table, highlight_warning};
use crate::error::{WranglerError, WranglerResult};
use crate::models::BudgetRuleViolation;

/// Prints violations to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAlertService {
    format: OutputFormat,
}

impl ConsoleAlertService {
    /// Create a console provider with the given output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render violations in the configured format
    pub fn render(&self, violations: &[BudgetRuleViolation]) -> WranglerResult<String> {
        match self.format {
            OutputFormat::Table => Ok(highlight_warning(&format_violation_table(violations))),
            OutputFormat::Json => {
                serde_json::to_string_pretty(violations).map_err(|e| WranglerError::Alert {
                    provider: "console",
                    message: e.to_string(),
                })
            }
        }
    }
}

impl BudgetAlertService for ConsoleAlertService {
    fn name(&self) -> &'static str {
        "console"
    }

    fn handle_violations(&self, violations: &[BudgetRuleViolation]) -> WranglerResult<()> {
        trace!(violation_count = violations.len(), "Processing violations");
        println!("{}", self.render(violations)?);
        Ok(())
    }
}
