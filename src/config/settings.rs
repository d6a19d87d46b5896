//! Wrangler configuration
//!
//! The configuration file declares the budgets per resource, the rules that
//! apply to every budgeted resource, and alert provider settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::paths;
use crate::error::WranglerError;
use crate::models::{Budget, BudgetRule};

/// Environment variable overriding the MS Teams webhook URL
pub const MSTEAMS_WEBHOOK_ENV_VAR: &str = "WRANGLER_MSTEAMS_WEBHOOK_URL";

/// MS Teams alert settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MsTeamsSettings {
    /// Incoming webhook the violation card is posted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Alert provider settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msteams: Option<MsTeamsSettings>,
}

/// Loaded Wrangler configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Budgets in match order; the first matching entry wins
    #[serde(default)]
    pub budgets: Vec<Budget>,

    /// Rules applied to every resource with a budget, after its local rules
    #[serde(default)]
    pub rules: Vec<BudgetRule>,

    /// Alert provider settings
    #[serde(default)]
    pub alert_provider: AlertProviderSettings,
}

impl Config {
    /// Load the configuration from a YAML file and apply the environment overlay
    pub fn load(path: &Path) -> Result<Self, WranglerError> {
        debug!(file = %paths::absolute(path).display(), "Reading config...");

        let contents = std::fs::read_to_string(path).map_err(|e| {
            WranglerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_yaml(&contents)?;
        config.apply_env_overlay(|key| std::env::var(key).ok());
        config.warn_shadowed_budgets();
        Ok(config)
    }

    /// Parse a configuration document
    pub fn from_yaml(contents: &str) -> Result<Self, WranglerError> {
        // An empty document is an empty configuration
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(contents)
            .map_err(|e| WranglerError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Override settings from environment variables
    pub fn apply_env_overlay<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(MSTEAMS_WEBHOOK_ENV_VAR).filter(|u| !u.is_empty()) {
            self.alert_provider
                .msteams
                .get_or_insert_with(MsTeamsSettings::default)
                .webhook_url = Some(url);
        }
    }

    /// The configured MS Teams webhook, if any
    pub fn msteams_webhook_url(&self) -> Option<&str> {
        self.alert_provider
            .msteams
            .as_ref()
            .and_then(|s| s.webhook_url.as_deref())
    }

    /// Indexes of budget entries that can never be matched
    ///
    /// An entry is shadowed when an earlier entry names the same resource and
    /// either has no currency scope or the same one.
    pub fn shadowed_budgets(&self) -> Vec<usize> {
        self.budgets
            .iter()
            .enumerate()
            .filter(|(i, budget)| {
                self.budgets[..*i].iter().any(|earlier| {
                    earlier.resource_id.eq_ignore_ascii_case(&budget.resource_id)
                        && (earlier.currency.is_none() || earlier.currency == budget.currency)
                })
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn warn_shadowed_budgets(&self) {
        for index in self.shadowed_budgets() {
            warn!(
                resource_id = %self.budgets[index].resource_id,
                index,
                "Budget entry is shadowed by an earlier entry and will never match"
            );
        }
    }
}
