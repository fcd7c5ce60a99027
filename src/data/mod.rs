//! Data layer - Static mappings and constants
//!
//! This module contains the static data used by the grid model:
//! - Attribute keys and cell tags
//! - HTML escape table
//! - Command name table

pub mod commands;
pub mod constants;

// Re-export commonly used items
pub use commands::{lookup_command, suggest_command, COMMAND_NAMES};
pub use constants::{escape_html, COLSPAN_ATTR, ROWSPAN_ATTR, TAG_DATA, TAG_HEADER};
