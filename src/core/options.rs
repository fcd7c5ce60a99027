//! Options for building and rendering tables

/// Largest colspan browsers honour
pub const DEFAULT_MAX_COLSPAN: usize = 1000;
/// Largest rowspan browsers honour
pub const DEFAULT_MAX_ROWSPAN: usize = 65534;

/// Options used by [`GridBuilder`](crate::core::table::GridBuilder)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOptions {
    /// Declared colspans above this are clamped
    pub max_colspan: usize,
    /// Declared rowspans above this are clamped
    pub max_rowspan: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            max_colspan: DEFAULT_MAX_COLSPAN,
            max_rowspan: DEFAULT_MAX_ROWSPAN,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_colspan(mut self, max: usize) -> Self {
        self.max_colspan = max.max(1);
        self
    }

    pub fn with_max_rowspan(mut self, max: usize) -> Self {
        self.max_rowspan = max.max(1);
        self
    }
}

/// Options used when rendering a table to markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Group leading header rows into `<thead>` and the rest into `<tbody>`
    pub sections: bool,
    /// Spaces per nesting level; `None` writes everything on one line
    pub indent: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sections: true,
            indent: Some(2),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output without section grouping
    pub fn compact() -> Self {
        Self {
            sections: false,
            indent: None,
        }
    }
}
