//! Table Grid Model
//!
//! A span-aware grid model for editable tables.
//!
//! This module provides:
//! - The cell/row storage and the explicit grid index
//! - The manager/managed ownership graph behind merged cells
//! - Derived `colspan`/`rowspan`/coordinates, recomputed on every read
//! - Grid building from raw row/cell records (`GridBuilder`)
//! - Rectangle validation for merge candidates
//!
//! # Architecture
//!
//! Every grid slot holds exactly one cell id. A merged cell is an *active*
//! cell that manages the placeholder cells filling the rest of its
//! footprint:
//!
//! ```text
//! +----+----+----+        A manages a1, a2
//! | A  | a1 | a2 |        colspan(A) = 1 + |{a1, a2}| = 3
//! +----+----+----+
//! | B  | C  | D  |
//! +----+----+----+
//! ```
//!
//! # Example
//!
//! ```
//! use tablegrid::core::table::Table;
//!
//! let mut table = Table::uniform(2, 3);
//! let a = table.cell_at(0, 0).unwrap();
//! let b = table.cell_at(0, 1).unwrap();
//! table.merge_with(b, a);
//! assert_eq!(table.colspan(a), 2);
//! ```

mod builder;
mod cell;
mod content;
mod links;
mod manage;
mod rect;


use fxhash::FxHashMap;
use std::sync::atomic::{AtomicU32, Ordering};

pub(crate) use links::Links;

// Re-export public API
pub use builder::{BuildOutput, CellRecord, GridBuilder, RowRecord, TableRecord};
pub use crate::utils::error::BuildWarning;
pub use cell::{Attributes, Cell, CellId, GridPos, Row, RowId};
pub use content::{Content, Inline};
pub use rect::{is_rectangular, selection_rectangle};

/// Cell ids are unique across every table in the process, so a cell of
/// one table is never mistaken for a cell of another.
static NEXT_CELL: AtomicU32 = AtomicU32::new(0);

/// A table: ordered rows over a fully tiled grid of cells.
///
/// A clone keeps the cell ids of the original.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub(crate) rows: Vec<Row>,
    pub(crate) cells: FxHashMap<CellId, Cell>,
    pub(crate) links: Links,
    /// Coordinate index, rebuilt after every structural change
    index: FxHashMap<CellId, GridPos>,
    next_row: u32,
}

impl Table {
    /// Create a table with no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `rows × columns` table of independent empty cells
    pub fn uniform(rows: usize, columns: usize) -> Self {
        let mut table = Table::new();
        for _ in 0..rows {
            let mut row = table.alloc_row(false, Attributes::new());
            for _ in 0..columns {
                row.cells
                    .push(table.alloc_cell(false, Attributes::new(), Content::new()));
            }
            table.rows.push(row);
        }
        table.reindex();
        table
    }

    // ------------------------------------------------------------------
    // Storage
    // ------------------------------------------------------------------

    pub(crate) fn alloc_cell(
        &mut self,
        header: bool,
        attributes: Attributes,
        content: Content,
    ) -> CellId {
        let id = CellId(NEXT_CELL.fetch_add(1, Ordering::Relaxed));
        self.cells
            .insert(id, Cell::new(id, header, attributes, content));
        id
    }

    pub(crate) fn alloc_row(&mut self, header: bool, attributes: Attributes) -> Row {
        let id = RowId(self.next_row);
        self.next_row += 1;
        Row::new(id, header, attributes)
    }

    /// Rebuild the coordinate index from the row vectors
    pub(crate) fn reindex(&mut self) {
        self.index.clear();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &cell) in row.cells.iter().enumerate() {
                self.index.insert(cell, GridPos::new(r, c));
            }
        }
    }

    /// Drop a cell from the arena and the ownership graph
    pub(crate) fn discard_cell(&mut self, cell: CellId) {
        self.links.forget(cell);
        self.cells.remove(&cell);
    }

    pub(crate) fn insert_row(&mut self, at: usize, row: Row) {
        self.rows.insert(at, row);
        self.reindex();
    }

    pub(crate) fn remove_row(&mut self, at: usize) {
        let row = self.rows.remove(at);
        for cell in row.cells {
            self.discard_cell(cell);
        }
        self.reindex();
    }

    /// Insert one cell per row at column `at`
    pub(crate) fn insert_column(&mut self, at: usize, cells: Vec<CellId>) {
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.cells.insert(at, cell);
        }
        self.reindex();
    }

    pub(crate) fn remove_column(&mut self, at: usize) {
        let removed: Vec<CellId> = self
            .rows
            .iter_mut()
            .filter(|row| at < row.cells.len())
            .map(|row| row.cells.remove(at))
            .collect();
        for cell in removed {
            self.discard_cell(cell);
        }
        self.reindex();
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn contains(&self, cell: CellId) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(&id)
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /// Rows of the grid, each holding active and managed cells
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Transposed view of the grid
    pub fn columns(&self) -> Vec<Vec<CellId>> {
        (0..self.column_count())
            .map(|c| {
                self.rows
                    .iter()
                    .filter_map(|row| row.cells.get(c).copied())
                    .collect()
            })
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Row::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell_at(&self, row: usize, column: usize) -> Option<CellId> {
        self.rows.get(row)?.cells.get(column).copied()
    }

    pub fn position(&self, cell: CellId) -> Option<GridPos> {
        self.index.get(&cell).copied()
    }

    pub fn row_index(&self, cell: CellId) -> Option<usize> {
        self.position(cell).map(|pos| pos.row)
    }

    pub fn column_index(&self, cell: CellId) -> Option<usize> {
        self.position(cell).map(|pos| pos.column)
    }

    /// Active cells in row-major order
    pub fn active_cells(&self) -> Vec<CellId> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter().copied())
            .filter(|&cell| self.is_active(cell))
            .collect()
    }

    // ------------------------------------------------------------------
    // Ownership and derived spans
    // ------------------------------------------------------------------

    /// True iff the cell has no manager
    pub fn is_active(&self, cell: CellId) -> bool {
        self.links.is_active(cell)
    }

    pub fn manager(&self, cell: CellId) -> Option<CellId> {
        self.links.manager(cell)
    }

    /// Cells currently owned by `cell`
    pub fn managed(&self, cell: CellId) -> Vec<CellId> {
        self.links.managed(cell).collect()
    }

    /// The manager of `cell`, or `cell` itself when it is active
    pub fn root(&self, cell: CellId) -> CellId {
        self.links.manager(cell).unwrap_or(cell)
    }

    /// `1 + |{c ∈ managed : c.rowIndex = rowIndex}|`
    pub fn colspan(&self, cell: CellId) -> usize {
        let Some(row) = self.row_index(cell) else {
            return 1;
        };
        1 + self
            .links
            .managed(cell)
            .filter(|&m| self.row_index(m) == Some(row))
            .count()
    }

    /// `1 + |{c ∈ managed : c.columnIndex = columnIndex}|`
    pub fn rowspan(&self, cell: CellId) -> usize {
        let Some(column) = self.column_index(cell) else {
            return 1;
        };
        1 + self
            .links
            .managed(cell)
            .filter(|&m| self.column_index(m) == Some(column))
            .count()
    }

    /// Every grid slot covered by `cell` and the cells it manages
    pub fn footprint(&self, cell: CellId) -> Vec<GridPos> {
        std::iter::once(cell)
            .chain(self.links.managed(cell))
            .filter_map(|c| self.position(c))
            .collect()
    }
}
