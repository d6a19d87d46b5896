//! MS Teams alert provider
//!
//! Posts a summary card of the violations to a Teams incoming webhook.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use super::BudgetAlertService;
use crate::error::{WranglerError, WranglerResult};
use crate::models::BudgetRuleViolation;

const PROVIDER: &str = "msteams";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const THEME_COLOR: &str = "FFA500";

/// Legacy connector card accepted by Teams incoming webhooks
#[derive(Debug, Serialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    card_type: &'static str,
    #[serde(rename = "@context")]
    context: &'static str,
    summary: String,
    #[serde(rename = "themeColor")]
    theme_color: &'static str,
    title: String,
    sections: Vec<CardSection>,
}

#[derive(Debug, Serialize)]
struct CardSection {
    #[serde(rename = "activityTitle")]
    activity_title: String,
    facts: Vec<CardFact>,
}

#[derive(Debug, Serialize)]
struct CardFact {
    name: &'static str,
    value: String,
}

impl MessageCard {
    /// Build a card with one section per violation
    pub fn from_violations(violations: &[BudgetRuleViolation]) -> Self {
        let summary = format!("{} budget violation(s)", violations.len());
        let sections = violations
            .iter()
            .map(|v| CardSection {
                activity_title: format!("{} - {}", v.resource_id, v.name),
                facts: vec![
                    CardFact {
                        name: "Condition",
                        value: v.description.clone(),
                    },
                    CardFact {
                        name: "Date",
                        value: v.date.format("%Y-%m-%d").to_string(),
                    },
                    CardFact {
                        name: "Budget amount",
                        value: v.formatted_budget_amount(),
                    },
                    CardFact {
                        name: "Actual amount",
                        value: v.formatted_actual_amount(),
                    },
                ],
            })
            .collect();

        Self {
            card_type: "MessageCard",
            context: "https://schema.org/extensions",
            title: format!("Wrangler: {}", summary),
            summary,
            theme_color: THEME_COLOR,
            sections,
        }
    }
}

/// Sends violations to an MS Teams channel
#[derive(Debug, Clone)]
pub struct MsTeamsAlertService {
    webhook_url: String,
}

impl MsTeamsAlertService {
    /// Create a provider posting to the given webhook
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
        }
    }

    fn alert_error(message: impl ToString) -> WranglerError {
        WranglerError::Alert {
            provider: PROVIDER,
            message: message.to_string(),
        }
    }
}

impl BudgetAlertService for MsTeamsAlertService {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn handle_violations(&self, violations: &[BudgetRuleViolation]) -> WranglerResult<()> {
        trace!(violation_count = violations.len(), "Processing violations");
        if violations.is_empty() {
            return Ok(());
        }

        let card = MessageCard::from_violations(violations);
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Self::alert_error)?;

        let response = client
            .post(&self.webhook_url)
            .json(&card)
            .send()
            .map_err(Self::alert_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::alert_error(format!("webhook returned {}", status)));
        }

        debug!(%status, "Violations posted to MS Teams");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use chrono::NaiveDate;

    fn violation(resource_id: &str) -> BudgetRuleViolation {
        BudgetRuleViolation {
            resource_id: resource_id.into(),
            name: "over-20".into(),
            description: "actual amount >= 20.00".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            budget_amount: None,
            actual_amount: 100.0,
            currency: Some(Currency::Eur),
        }
    }

    #[test]
    fn test_card_payload() {
        let card = MessageCard::from_violations(&[violation("app-1"), violation("app-2")]);
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["@type"], "MessageCard");
        assert_eq!(value["summary"], "2 budget violation(s)");
        assert_eq!(value["title"], "Wrangler: 2 budget violation(s)");
        assert_eq!(value["sections"].as_array().unwrap().len(), 2);
        assert_eq!(value["sections"][1]["activityTitle"], "app-2 - over-20");
        assert_eq!(value["sections"][0]["facts"][2]["value"], "-");
        assert_eq!(value["sections"][0]["facts"][3]["value"], "€100.00");
    }

    #[test]
    fn test_no_violations_sends_nothing() {
        // An unroutable URL would fail if a request were attempted
        let service = MsTeamsAlertService::new("http://127.0.0.1:9/unused");
        assert!(service.handle_violations(&[]).is_ok());
    }
}
