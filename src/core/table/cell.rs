//! Cell and row types for the table grid

use indexmap::IndexMap;
use std::fmt;

use super::content::Content;

/// Opaque attribute bag carried by rows and cells.
///
/// Insertion order is preserved so rendered attributes come out in the
/// order they were declared.
pub type Attributes = IndexMap<String, String>;

/// Stable identifier of a cell within its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) u32);

impl CellId {
    /// Raw numeric value
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Stable identifier of a row within its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u32);

impl RowId {
    /// Raw numeric value
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A (row, column) slot in the grid, both 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub column: usize,
}

impl GridPos {
    pub fn new(row: usize, column: usize) -> Self {
        GridPos { row, column }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The atomic editable unit of a table.
///
/// Spans and coordinates are not stored here: they are derived from the
/// owning [`Table`](super::Table) on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub(crate) id: CellId,
    /// Whether this cell renders as a header cell
    pub header: bool,
    /// Opaque attributes (never contains `colspan`/`rowspan` after building)
    pub attributes: Attributes,
    /// Child content owned by the cell
    pub content: Content,
}

impl Cell {
    pub(crate) fn new(id: CellId, header: bool, attributes: Attributes, content: Content) -> Self {
        Cell {
            id,
            header,
            attributes,
            content,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }
}

/// A table row.
///
/// `cells` holds one id per grid column, active and managed cells alike,
/// so the rows of a table together form the grid index.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub(crate) id: RowId,
    /// Whether the row belongs to the header section
    pub header: bool,
    /// Opaque attributes
    pub attributes: Attributes,
    pub(crate) cells: Vec<CellId>,
}

impl Row {
    pub(crate) fn new(id: RowId, header: bool, attributes: Attributes) -> Self {
        Row {
            id,
            header,
            attributes,
            cells: Vec::new(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Grid slots of this row, left to right
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
