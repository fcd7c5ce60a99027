//! Feature modules - Surfaces around the grid engine
//!
//! This module contains the collaborators facing outward:
//! - Rendering active cells to rows of TH/TD cells and HTML
//! - Loading table records from JSON/YAML (`data-loading` feature)

pub mod render;

#[cfg(feature = "data-loading")]
pub mod records;

// Re-export commonly used types
pub use render::{render_table, table_to_html, to_html, RenderedCell, RenderedRow, RenderedTable};
