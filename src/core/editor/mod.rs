//! Structural Editor
//!
//! Row/column insertion and deletion, merging and unmerging, applied to a
//! [`Table`] that already satisfies the grid invariants. Every operation
//! keeps the grid rectangular and the ownership graph reciprocal.
//!
//! Operations never fail. An anchor that does not belong to the table, or a
//! selection that is not an exact rectangle, leaves the table untouched and
//! reports [`EditEffect::Unchanged`].
//!
//! Row and column operations share one implementation parameterized by an
//! [`Axis`]: a *line* is a row on the row axis and a column on the column
//! axis, and a *slot* is a position along a line.

mod delete;
mod insert;
mod merge;


use crate::core::table::{CellId, GridPos, Table};

/// Outcome of a structural edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEffect {
    /// Nothing changed
    Unchanged,
    /// The table changed; the caret should move to the start of `anchor`
    Edited { anchor: Option<CellId> },
    /// The edit would leave no rows or columns; the table must go
    RemoveTable,
}

impl EditEffect {
    pub fn is_changed(&self) -> bool {
        !matches!(self, EditEffect::Unchanged)
    }
}

/// Grid axis an operation works along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Rows,
    Columns,
}

impl Axis {
    /// Index of the line containing `pos`
    fn line(self, pos: GridPos) -> usize {
        match self {
            Axis::Rows => pos.row,
            Axis::Columns => pos.column,
        }
    }

    /// Index of `pos` along its line
    fn slot(self, pos: GridPos) -> usize {
        match self {
            Axis::Rows => pos.column,
            Axis::Columns => pos.row,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Axis::Rows => "row",
            Axis::Columns => "column",
        }
    }
}

impl Table {
    fn line_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Rows => self.row_count(),
            Axis::Columns => self.column_count(),
        }
    }

    fn line_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Rows => self.column_count(),
            Axis::Columns => self.row_count(),
        }
    }

    fn slot_cell(&self, axis: Axis, line: usize, slot: usize) -> Option<CellId> {
        match axis {
            Axis::Rows => self.cell_at(line, slot),
            Axis::Columns => self.cell_at(slot, line),
        }
    }

    fn line_cells(&self, axis: Axis, line: usize) -> Vec<CellId> {
        (0..self.line_len(axis))
            .filter_map(|slot| self.slot_cell(axis, line, slot))
            .collect()
    }

    /// Insert a row above the anchor cell's row
    pub fn add_row_above(&mut self, anchor: CellId) -> EditEffect {
        self.insert_line(Axis::Rows, anchor, false)
    }

    /// Insert a row below the anchor cell's row
    pub fn add_row_below(&mut self, anchor: CellId) -> EditEffect {
        self.insert_line(Axis::Rows, anchor, true)
    }

    /// Insert a column left of the anchor cell's column
    pub fn add_column_before(&mut self, anchor: CellId) -> EditEffect {
        self.insert_line(Axis::Columns, anchor, false)
    }

    /// Insert a column right of the anchor cell's column
    pub fn add_column_after(&mut self, anchor: CellId) -> EditEffect {
        self.insert_line(Axis::Columns, anchor, true)
    }

    /// Delete the anchor cell's row
    pub fn delete_row(&mut self, anchor: CellId) -> EditEffect {
        self.delete_line(Axis::Rows, anchor)
    }

    /// Delete the anchor cell's column
    pub fn delete_column(&mut self, anchor: CellId) -> EditEffect {
        self.delete_line(Axis::Columns, anchor)
    }
}
