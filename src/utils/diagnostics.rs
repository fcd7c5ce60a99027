//! Table consistency diagnostics
//!
//! This module checks a [`Table`] against the grid invariants without going
//! through the editor. It can identify:
//!
//! - Ragged rows and cells placed twice or not at all
//! - Broken manager/managed reciprocity and nested ownership
//! - Merged cells whose footprint is not a rectangle
//! - Span attributes that should have been consumed by the builder
//!
//! ## Example
//!
//! ```rust
//! use tablegrid::core::table::Table;
//! use tablegrid::diagnostics::check_table;
//!
//! let result = check_table(&Table::uniform(2, 2));
//! assert!(result.is_empty());
//! ```

use fxhash::{FxHashMap, FxHashSet};
use std::fmt;

use crate::core::table::{CellId, GridPos, Table};
use crate::data::constants::{COLSPAN_ATTR, ROWSPAN_ATTR};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// The table is consistent but was built in an unusual way
    Info,
    /// Renders, but not the way the grid says it should
    Warning,
    /// A grid invariant is broken
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticLevel::Info => "note",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Error => "error",
        })
    }
}

/// One finding of [`check_table`]
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub position: Option<GridPos>,
    pub cell: Option<CellId>,
    pub hint: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            position: None,
            cell: None,
            hint: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, message)
    }

    pub fn at(mut self, position: GridPos) -> Self {
        self.position = Some(position);
        self
    }

    pub fn for_cell(mut self, cell: CellId) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;
        match (self.cell, self.position) {
            (Some(cell), Some(pos)) => write!(f, " [cell {} at slot {}]", cell, pos)?,
            (Some(cell), None) => write!(f, " [cell {}]", cell)?,
            (None, Some(pos)) => write!(f, " [slot {}]", pos)?,
            (None, None) => {}
        }
        if let Some(hint) = &self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}

/// Everything [`check_table`] found, in check order
#[derive(Debug, Default)]
pub struct CheckResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn add(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(DiagnosticLevel::Error) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// One diagnostic per line, colored by level when `use_color` is set
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    if result.is_empty() {
        return "table is consistent".to_string();
    }
    let mut output = String::new();
    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",
                DiagnosticLevel::Warning => "\x1b[33m",
                DiagnosticLevel::Info => "\x1b[34m",
            };
            output.push_str(&format!("{}{}\x1b[0m\n", color, diag));
        } else {
            output.push_str(&format!("{}\n", diag));
        }
    }
    output
}

/// Check a table against the grid invariants
pub fn check_table(table: &Table) -> CheckResult {
    let mut result = CheckResult::default();
    check_layout(table, &mut result);
    check_ownership(table, &mut result);
    check_footprints(table, &mut result);
    check_attributes(table, &mut result);
    result
}

/// Rectangularity: equal row lengths, every id placed exactly once
fn check_layout(table: &Table, result: &mut CheckResult) {
    let columns = table.column_count();
    let mut placed: FxHashMap<CellId, GridPos> = FxHashMap::default();

    for (r, row) in table.rows().iter().enumerate() {
        if row.len() != columns {
            result.add(
                Diagnostic::error(format!("row {} has {} slots, expected {}", r, row.len(), columns))
                    .hint("every row must cover the full column count"),
            );
        }
        for (c, &cell) in row.cells().iter().enumerate() {
            let pos = GridPos::new(r, c);
            if !table.contains(cell) {
                result.add(Diagnostic::error("slot refers to an unknown cell").at(pos).for_cell(cell));
            }
            if let Some(first) = placed.insert(cell, pos) {
                result.add(
                    Diagnostic::error(format!("cell is placed twice, first at {}", first))
                        .at(pos)
                        .for_cell(cell),
                );
            }
        }
    }

    for &cell in table.cells.keys() {
        if !placed.contains_key(&cell) {
            result.add(Diagnostic::error("cell is not placed in the grid").for_cell(cell));
        }
    }
}

/// Reciprocity and single-level ownership
fn check_ownership(table: &Table, result: &mut CheckResult) {
    for (cell, manager) in table.links.pairs() {
        if !table.links.managed(manager).any(|m| m == cell) {
            result.add(
                Diagnostic::error(format!("manager {} does not list this cell", manager)).for_cell(cell),
            );
        }
        if !table.links.is_active(manager) {
            result.add(Diagnostic::error(format!("manager {} is itself managed", manager)).for_cell(cell));
        }
    }

    for (manager, managed) in table.links.managers() {
        for &cell in managed {
            if table.links.manager(cell) != Some(manager) {
                result.add(
                    Diagnostic::error(format!("listed as managed by {} but points elsewhere", manager))
                        .for_cell(cell),
                );
            }
        }
    }
}

/// Every merged cell covers a filled rectangle anchored at its top-left
fn check_footprints(table: &Table, result: &mut CheckResult) {
    for cell in table.active_cells() {
        if table.links.managed_count(cell) == 0 {
            continue;
        }
        let footprint: FxHashSet<GridPos> = table.footprint(cell).into_iter().collect();
        let top = footprint.iter().map(|p| p.row).min().unwrap_or(0);
        let bottom = footprint.iter().map(|p| p.row).max().unwrap_or(0);
        let left = footprint.iter().map(|p| p.column).min().unwrap_or(0);
        let right = footprint.iter().map(|p| p.column).max().unwrap_or(0);
        let area = (bottom - top + 1) * (right - left + 1);

        if footprint.len() != area {
            result.add(
                Diagnostic::warning(format!(
                    "merged cell covers {} of the {} slots of its bounding box",
                    footprint.len(),
                    area
                ))
                .for_cell(cell),
            );
            continue;
        }
        if let Some(pos) = table.position(cell) {
            if pos != GridPos::new(top, left) {
                result.add(
                    Diagnostic::note("merged cell is not the top-left cell of its footprint")
                        .at(pos)
                        .for_cell(cell)
                        .hint("select cells from the top-left corner before merging"),
                );
            }
        }
    }
}

fn check_attributes(table: &Table, result: &mut CheckResult) {
    for row in table.rows() {
        for &id in row.cells() {
            let Some(cell) = table.cell(id) else {
                continue;
            };
            for key in [COLSPAN_ATTR, ROWSPAN_ATTR] {
                if cell.attributes.contains_key(key) {
                    result.add(
                        Diagnostic::warning(format!("stored `{}` attribute is ignored; spans are derived", key))
                            .for_cell(id),
                    );
                }
            }
        }
    }
}
