//! Configuration module for Wrangler
//!
//! This module provides configuration management including:
//! - Config file path resolution
//! - YAML config loading with an environment overlay

pub mod paths;
pub mod settings;

pub use settings::{AlertProviderSettings, Config, MsTeamsSettings};
