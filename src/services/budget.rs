//! Budget checking service
//!
//! Resolves a budget for each cost record and evaluates the applicable
//! local and global rules against it, collecting the violations in record
//! order.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{WranglerError, WranglerResult};
use crate::models::{Budget, BudgetRule, BudgetRuleViolation, CostRecord};

/// Service for checking cost records against budgets
pub struct BudgetChecker<'a> {
    config: &'a Config,
}

impl<'a> BudgetChecker<'a> {
    /// Create a checker over a loaded configuration
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find the configured budget for a record
    ///
    /// The first entry whose resource matches case-insensitively and whose
    /// currency scope admits the record wins.
    pub fn find_budget(&self, record: &CostRecord) -> Option<&'a Budget> {
        self.config.budgets.iter().find(|b| b.matches(record))
    }

    /// Resolve the budget for a record, inferring one from its baseline
    ///
    /// Inferred budgets live only for the record they were built from.
    pub fn resolve_budget(&self, record: &CostRecord) -> Option<Cow<'a, Budget>> {
        if let Some(budget) = self.find_budget(record) {
            return Some(Cow::Borrowed(budget));
        }

        let budget = Budget::from_baseline(record)?;
        trace!(
            resource_id = %record.resource_id,
            monthly_amount = ?budget.monthly_amount,
            daily_amount = ?budget.daily_amount,
            "No budget defined for resource, budget estimated from baseline"
        );
        Some(Cow::Owned(budget))
    }

    /// Check every record, returning violations in record order
    pub fn check(&self, records: &[CostRecord]) -> WranglerResult<Vec<BudgetRuleViolation>> {
        let mut violations = Vec::new();
        for record in records {
            violations.extend(self.check_record(record)?);
        }
        Ok(violations)
    }

    /// Check a single record: local rules first, then global rules
    pub fn check_record(&self, record: &CostRecord) -> WranglerResult<Vec<BudgetRuleViolation>> {
        debug!(
            resource_id = %record.resource_id,
            period = ?record.period,
            value = record.value,
            "Checking record"
        );

        let budget = match self.resolve_budget(record) {
            Some(budget) if budget.has_amount() => budget,
            _ => {
                trace!(resource_id = %record.resource_id, "No budget amount, record skipped");
                return Ok(Vec::new());
            }
        };

        let mut violations = Vec::new();

        if budget.rules.is_empty() {
            trace!("No local rules found.");
        } else {
            trace!(
                resource_id = %record.resource_id,
                rule_count = budget.rules.len(),
                "Evaluating local rules"
            );
            let local = get_violations(&budget.rules, &budget, record)
                .map_err(|e| WranglerError::local_rules(&record.resource_id, e))?;
            violations.extend(local);
        }

        if self.config.rules.is_empty() {
            trace!("No global rules found.");
        } else {
            trace!(
                resource_id = %record.resource_id,
                rule_count = self.config.rules.len(),
                "Evaluating global rules"
            );
            let global = get_violations(&self.config.rules, &budget, record)
                .map_err(|e| WranglerError::global_rules(&record.resource_id, e))?;
            violations.extend(global);
        }

        Ok(violations)
    }
}

/// Check cost records against the configured budgets and rules
pub fn check_budgets(
    records: &[CostRecord],
    config: &Config,
) -> WranglerResult<Vec<BudgetRuleViolation>> {
    BudgetChecker::new(config).check(records)
}

/// Rules whose category and currency scope admit the record, in list order
pub fn select_rules<'r>(
    rules: &'r [BudgetRule],
    record: &'r CostRecord,
) -> impl Iterator<Item = &'r BudgetRule> + 'r {
    rules.iter().filter(move |rule| rule.applies_to(record))
}

/// Evaluate the applicable rules and build a violation for each breach
pub fn get_violations(
    rules: &[BudgetRule],
    budget: &Budget,
    record: &CostRecord,
) -> WranglerResult<Vec<BudgetRuleViolation>> {
    Ok(select_rules(rules, record)
        .filter(|rule| rule.evaluate(budget, record))
        .map(|rule| BudgetRuleViolation::new(rule, budget, record))
        .collect())
}
