//! Grid builder: raw row/cell records to a fully tiled grid

use log::{debug, warn};

use super::cell::{Attributes, CellId};
use super::content::Content;
use super::Table;
use crate::core::options::GridOptions;
use crate::data::constants::{COLSPAN_ATTR, ROWSPAN_ATTR};
use crate::utils::error::BuildWarning;

/// A raw cell as extracted by a document parser
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub header: bool,
    /// Declared colspan; falls back to the `colspan` attribute
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "de::span",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub colspan: Option<String>,
    /// Declared rowspan; falls back to the `rowspan` attribute
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "de::span",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub rowspan: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "de::attributes"))]
    pub attributes: Attributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: Content,
}

impl CellRecord {
    pub fn new(content: impl Into<Content>) -> Self {
        CellRecord {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn header(mut self) -> Self {
        self.header = true;
        self
    }

    pub fn with_colspan(mut self, span: usize) -> Self {
        self.colspan = Some(span.to_string());
        self
    }

    pub fn with_rowspan(mut self, span: usize) -> Self {
        self.rowspan = Some(span.to_string());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Declared colspan as written in the source, field before attribute
    fn declared_colspan(&self) -> Option<&str> {
        self.colspan
            .as_deref()
            .or_else(|| self.attributes.get(COLSPAN_ATTR).map(String::as_str))
    }

    fn declared_rowspan(&self) -> Option<&str> {
        self.rowspan
            .as_deref()
            .or_else(|| self.attributes.get(ROWSPAN_ATTR).map(String::as_str))
    }
}

/// A raw row as extracted by a document parser
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub header: bool,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "de::attributes"))]
    pub attributes: Attributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cells: Vec<CellRecord>,
}

impl RowRecord {
    pub fn new(cells: Vec<CellRecord>) -> Self {
        RowRecord {
            cells,
            ..Default::default()
        }
    }

    /// A header-section row; its cells are marked as header cells too
    pub fn header(cells: Vec<CellRecord>) -> Self {
        RowRecord {
            header: true,
            attributes: Attributes::new(),
            cells: cells.into_iter().map(CellRecord::header).collect(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A raw table: rows in document order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub rows: Vec<RowRecord>,
}

impl TableRecord {
    pub fn new(rows: Vec<RowRecord>) -> Self {
        TableRecord { rows }
    }
}

/// Built table with the warnings raised while repairing the input
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub table: Table,
    pub warnings: Vec<BuildWarning>,
}

impl BuildOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Converts raw records into a rectangular grid.
///
/// Placement is greedy: each cell takes the leftmost free slot of its row,
/// slots already covered by an earlier rowspan are skipped, and any slot
/// still empty at the end is patched with a fresh empty cell. A span that
/// runs into an earlier cell shrinks to the largest free rectangle, so
/// every footprint stays rectangular.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    options: GridOptions,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GridOptions) -> Self {
        GridBuilder { options }
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Build a table, discarding warnings
    pub fn build_table(&self, record: TableRecord) -> Table {
        self.build(record).table
    }

    /// Build a table from records
    pub fn build(&self, record: TableRecord) -> BuildOutput {
        let mut warnings = Vec::new();
        let mut table = Table::new();

        let row_count = record.rows.len();
        let column_count = record.rows.first().map_or(0, |row| {
            row.cells
                .iter()
                .map(|cell| {
                    self.resolve_span(cell.declared_colspan(), self.options.max_colspan, None)
                })
                .sum()
        });
        debug!("building {}x{} grid", row_count, column_count);

        let mut grid: Vec<Vec<Option<CellId>>> = vec![vec![None; column_count]; row_count];
        // (placeholder, owner) pairs, merged once the grid index exists
        let mut pending: Vec<(CellId, CellId)> = Vec::new();
        let mut rows = Vec::with_capacity(row_count);

        for (r, row_record) in record.rows.into_iter().enumerate() {
            rows.push(table.alloc_row(row_record.header, row_record.attributes));

            for cell_record in row_record.cells {
                let colspan = self.resolve_span(
                    cell_record.declared_colspan(),
                    self.options.max_colspan,
                    Some((&mut warnings, r)),
                );
                let rowspan = self.resolve_span(
                    cell_record.declared_rowspan(),
                    self.options.max_rowspan,
                    Some((&mut warnings, r)),
                );

                let Some(col) = grid[r].iter().position(Option::is_none) else {
                    warn!("row {} has no free slot left, dropping cell", r);
                    warnings.push(BuildWarning::in_row(
                        "row has more cells than the table has columns; cell dropped",
                        r,
                    ));
                    continue;
                };

                let CellRecord {
                    header,
                    mut attributes,
                    content,
                    ..
                } = cell_record;
                attributes.shift_remove(COLSPAN_ATTR);
                attributes.shift_remove(ROWSPAN_ATTR);

                let owner = table.alloc_cell(header, attributes.clone(), content);
                grid[r][col] = Some(owner);

                if r + rowspan > row_count || col + colspan > column_count {
                    warn!("span of cell at ({}, {}) clipped to the grid", r, col);
                    warnings.push(BuildWarning::at(
                        format!(
                            "span {}x{} exceeds the grid and was clipped",
                            rowspan, colspan
                        ),
                        r,
                        col,
                    ));
                }
                let wanted = (
                    rowspan.min(row_count - r),
                    colspan.min(column_count - col),
                );

                // Largest free rectangle anchored at the slot
                let mut width = 1;
                while width < wanted.1 && grid[r][col + width].is_none() {
                    width += 1;
                }
                let mut height = 1;
                while height < wanted.0
                    && (col..col + width).all(|j| grid[r + height][j].is_none())
                {
                    height += 1;
                }
                if (height, width) != wanted {
                    warnings.push(BuildWarning::at(
                        format!(
                            "overlapping span; shrunk from {}x{} to {}x{}",
                            wanted.0, wanted.1, height, width
                        ),
                        r,
                        col,
                    ));
                }

                for i in r..r + height {
                    for j in col..col + width {
                        if (i, j) == (r, col) {
                            continue;
                        }
                        let placeholder =
                            table.alloc_cell(header, attributes.clone(), Content::new());
                        grid[i][j] = Some(placeholder);
                        pending.push((placeholder, owner));
                    }
                }
            }
        }

        for (r, (slots, row)) in grid.into_iter().zip(rows.iter_mut()).enumerate() {
            for (c, slot) in slots.into_iter().enumerate() {
                let cell = match slot {
                    Some(cell) => cell,
                    None => {
                        warnings.push(BuildWarning::at("empty slot patched with a new cell", r, c));
                        table.alloc_cell(row.header, Attributes::new(), Content::new())
                    }
                };
                row.cells.push(cell);
            }
        }

        table.rows = rows;
        table.reindex();
        for (placeholder, owner) in pending {
            table.merge_with(placeholder, owner);
        }

        for warning in &warnings {
            debug!("{}", warning);
        }
        BuildOutput { table, warnings }
    }

    /// Parse a declared span. Missing, empty, zero or non-numeric values
    /// mean 1; values above `max` are clamped.
    fn resolve_span(
        &self,
        raw: Option<&str>,
        max: usize,
        sink: Option<(&mut Vec<BuildWarning>, usize)>,
    ) -> usize {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return 1;
        };
        let parsed = parse_span(raw);
        let span = match parsed {
            Some(0) | None => {
                if let Some((warnings, row)) = sink {
                    warn!("ignoring invalid span value {:?} in row {}", raw, row);
                    warnings.push(BuildWarning::in_row(
                        format!("invalid span value '{}', using 1", raw),
                        row,
                    ));
                }
                return 1;
            }
            Some(n) => n,
        };
        if span > max {
            if let Some((warnings, row)) = sink {
                warnings.push(BuildWarning::in_row(
                    format!("span {} clamped to {}", span, max),
                    row,
                ));
            }
            return max;
        }
        span
    }
}

/// Leading decimal digits of a span value (`"3"`, `" 2 "`, `"2px"`)
pub(crate) fn parse_span(raw: &str) -> Option<usize> {
    let digits: String = raw
        .trim()
        .trim_start_matches('+')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<usize>().ok()
}

#[cfg(feature = "serde")]
mod de {
    use super::Attributes;
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer};

    /// Attribute values may be written as strings, numbers or booleans
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    impl Scalar {
        fn into_string(self) -> String {
            match self {
                Scalar::Text(s) => s,
                Scalar::Int(n) => n.to_string(),
                Scalar::Float(f) => f.to_string(),
                Scalar::Bool(b) => b.to_string(),
            }
        }
    }

    pub fn attributes<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: IndexMap<String, Scalar> = IndexMap::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(key, value)| (key, value.into_string()))
            .collect())
    }

    pub fn span<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
    }
}
