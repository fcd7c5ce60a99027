//! Core grid modules
//!
//! This module contains the table grid engine:
//! - `table`: grid model, cell management, grid building, rectangle checks
//! - `editor`: structural row/column/merge operations
//! - `command` and `document`: dispatcher-facing commands and the
//!   surrounding document
//! - `options`: builder and renderer settings

pub mod command;
pub mod document;
pub mod editor;
pub mod options;
pub mod table;

// Re-export main types
pub use command::{CommandLine, EditCommand};
pub use document::{AnchorHint, Block, BlockId, Document, Selection};
pub use editor::EditEffect;
pub use options::{GridOptions, RenderOptions};
pub use table::{
    is_rectangular, selection_rectangle, Attributes, BuildOutput, Cell, CellId, CellRecord,
    Content, GridBuilder, GridPos, Inline, Row, RowId, RowRecord, Table, TableRecord,
};
