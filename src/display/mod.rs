//! Display formatting for terminal output
//!
//! Provides utilities for formatting violations for the console.

pub mod violation;

pub use violation::{format_violation_table, highlight_warning};
