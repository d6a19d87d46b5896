//! Violation display formatting
//!
//! Formats budget rule violations for terminal output as a bordered table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::BudgetRuleViolation;

/// One table row, with amounts already formatted in the record's currency
#[derive(Tabled)]
struct ViolationRow {
    #[tabled(rename = "Resource ID")]
    resource_id: String,
    #[tabled(rename = "Rule name")]
    name: String,
    #[tabled(rename = "Condition")]
    condition: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Budget amount")]
    budget_amount: String,
    #[tabled(rename = "Actual amount")]
    actual_amount: String,
}

impl From<&BudgetRuleViolation> for ViolationRow {
    fn from(v: &BudgetRuleViolation) -> Self {
        Self {
            resource_id: v.resource_id.clone(),
            name: v.name.clone(),
            condition: v.description.clone(),
            date: v.date.format("%Y-%m-%d").to_string(),
            budget_amount: v.formatted_budget_amount(),
            actual_amount: v.formatted_actual_amount(),
        }
    }
}

/// Format violations as a table
pub fn format_violation_table(violations: &[BudgetRuleViolation]) -> String {
    if violations.is_empty() {
        return "No violations found.".to_string();
    }

    let mut table = Table::new(violations.iter().map(ViolationRow::from));
    table.with(Style::ascii());
    table.to_string()
}

/// Wrap text in the terminal warning colour
pub fn highlight_warning(text: &str) -> String {
    format!("\x1b[33m{}\x1b[0m", text) // Yellow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use chrono::NaiveDate;

    fn violation(budget_amount: Option<f64>) -> BudgetRuleViolation {
        BudgetRuleViolation {
            resource_id: "app-2".into(),
            name: "over-20".into(),
            description: "actual amount >= 20.00".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            budget_amount,
            actual_amount: 100.0,
            currency: Some(Currency::Gbp),
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_violation_table(&[]), "No violations found.");
    }

    #[test]
    fn test_table_contents() {
        let output = format_violation_table(&[violation(Some(50.0))]);

        for header in [
            "Resource ID",
            "Rule name",
            "Condition",
            "Date",
            "Budget amount",
            "Actual amount",
        ] {
            assert!(output.contains(header), "missing header {}", header);
        }
        assert!(output.contains("app-2"));
        assert!(output.contains("actual amount >= 20.00"));
        assert!(output.contains("2024-05-01"));
        assert!(output.contains("£50.00"));
        assert!(output.contains("£100.00"));
    }

    #[test]
    fn test_table_row_per_violation() {
        let output = format_violation_table(&[violation(Some(50.0)), violation(None)]);
        assert_eq!(output.matches("over-20").count(), 2);
        assert!(output.contains(" - "));
    }

    #[test]
    fn test_highlight_warning() {
        assert_eq!(highlight_warning("x"), "\x1b[33mx\x1b[0m");
    }
}
