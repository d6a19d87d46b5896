//! Custom error types for Wrangler
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Wrangler operations
#[derive(Error, Debug)]
pub enum WranglerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A cost record could not be parsed from its input row
    #[error("Failed to parse row {row}: {message}")]
    RecordParse { row: usize, message: String },

    /// A data provider failed to supply cost records
    #[error("Data provider '{provider}' failed: {message}")]
    DataProvider {
        provider: &'static str,
        message: String,
    },

    /// An alert provider failed to deliver violations
    #[error("Alert provider '{provider}' failed: {message}")]
    Alert {
        provider: &'static str,
        message: String,
    },

    /// Evaluation of a budget's own rules failed
    #[error("Error evaluating local rules for '{resource_id}': {source}")]
    LocalRules {
        resource_id: String,
        #[source]
        source: Box<WranglerError>,
    },

    /// Evaluation of the configuration-wide rules failed
    #[error("Error evaluating global rules for '{resource_id}': {source}")]
    GlobalRules {
        resource_id: String,
        #[source]
        source: Box<WranglerError>,
    },
}

impl WranglerError {
    /// Wrap an error raised while evaluating a budget's local rules
    pub fn local_rules(resource_id: impl Into<String>, source: WranglerError) -> Self {
        Self::LocalRules {
            resource_id: resource_id.into(),
            source: Box::new(source),
        }
    }

    /// Wrap an error raised while evaluating the global rules
    pub fn global_rules(resource_id: impl Into<String>, source: WranglerError) -> Self {
        Self::GlobalRules {
            resource_id: resource_id.into(),
            source: Box::new(source),
        }
    }

    /// Check if the fault lies in resource-specific configuration
    pub fn is_local_rules(&self) -> bool {
        matches!(self, Self::LocalRules { .. })
    }

    /// Check if the fault lies in the shared configuration
    pub fn is_global_rules(&self) -> bool {
        matches!(self, Self::GlobalRules { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for WranglerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for WranglerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for Wrangler operations
pub type WranglerResult<T> = Result<T, WranglerError>;
