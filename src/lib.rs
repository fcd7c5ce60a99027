//! # tablegrid
//!
//! Span-aware table grid model and structural editing engine for rich-text
//! editors, written in Rust.
//!
//! ## Features
//!
//! - **Fully tiled grid**: arbitrary `colspan`/`rowspan` input is resolved into
//!   a rectangular grid where every slot holds exactly one cell
//! - **Derived spans**: merged cells own placeholder cells; spans are computed
//!   from that ownership on every read, never cached
//! - **Structural editing**: insert/delete rows and columns, merge and unmerge
//!   cells, with the grid kept consistent after every edit
//! - **Robust by default**: malformed input is repaired and impossible edits
//!   are ignored, nothing panics on speculative commands
//! - **Diagnostics**: independent invariant checker for tables
//! - **Rendering**: TH/TD rows and HTML output
//!
//! ## Usage Examples
//!
//! ### Building a grid
//!
//! ```rust
//! use tablegrid::{build_table, CellRecord, RowRecord, TableRecord};
//!
//! let table = build_table(TableRecord::new(vec![
//!     RowRecord::new(vec![CellRecord::new("wide").with_colspan(3)]),
//!     RowRecord::new(vec![
//!         CellRecord::new("a"),
//!         CellRecord::new("b"),
//!         CellRecord::new("c"),
//!     ]),
//! ]));
//!
//! let wide = table.cell_at(0, 0).unwrap();
//! assert_eq!(table.colspan(wide), 3);
//! assert_eq!(table.column_count(), 3);
//! ```
//!
//! ### Editing through commands
//!
//! ```rust
//! use tablegrid::{Document, EditCommand, Selection, Table};
//!
//! let mut doc = Document::new();
//! let block = doc.push_table(Table::uniform(2, 2));
//! let first = doc.table(block).unwrap().cell_at(0, 0).unwrap();
//! let right = doc.table(block).unwrap().cell_at(0, 1).unwrap();
//!
//! doc.execute(EditCommand::MergeCells, &Selection::cells(block, vec![first, right]));
//! assert_eq!(doc.table(block).unwrap().colspan(first), 2);
//! ```

/// Core grid modules
pub mod core;

/// Data layer - static mappings and constants
pub mod data;

/// Feature modules - rendering and record loading
pub mod features;

/// Utility modules
pub mod utils;

// Re-export core types
pub use crate::core::{
    is_rectangular, selection_rectangle, AnchorHint, Attributes, Block, BlockId, BuildOutput,
    Cell, CellId, CellRecord, CommandLine, Content, Document, EditCommand, EditEffect, GridBuilder,
    GridOptions, GridPos, Inline, RenderOptions, Row, RowId, RowRecord, Selection, Table,
    TableRecord,
};

// Re-export feature modules
pub use features::render;

#[cfg(feature = "data-loading")]
pub use features::records;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{BuildWarning, GridError, GridResult};

/// Build a table from records with default options
pub fn build_table(record: TableRecord) -> Table {
    GridBuilder::new().build_table(record)
}

/// Build a table from records, keeping the repair warnings
pub fn build_table_with_warnings(record: TableRecord) -> BuildOutput {
    GridBuilder::new().build(record)
}

/// Render a table to indented HTML
pub fn render_html(table: &Table) -> String {
    render::table_to_html(table, &RenderOptions::default())
}
