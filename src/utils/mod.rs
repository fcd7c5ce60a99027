//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Table consistency diagnostics
//! - Error types and result types

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{check_table, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{BuildWarning, GridError, GridResult};
