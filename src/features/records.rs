//! Record loading
//!
//! Reads table records from JSON or YAML. Span values may be written as
//! strings or numbers:
//!
//! ```json
//! {"rows": [
//!   {"header": true, "cells": [{"content": [{"text": "Name"}], "colspan": 2}]},
//!   {"cells": [{"content": [{"text": "a"}]}, {"attributes": {"rowspan": "1"}}]}
//! ]}
//! ```

use crate::core::options::GridOptions;
use crate::core::table::{BuildOutput, GridBuilder, TableRecord};
use crate::features::render::RenderedTable;
use crate::utils::error::{GridError, GridResult};

/// Input format of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    /// Guess the format from a file name, defaulting to JSON
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            RecordFormat::Yaml
        } else {
            RecordFormat::Json
        }
    }
}

/// Parse a table record from JSON
pub fn table_from_json(input: &str) -> GridResult<TableRecord> {
    serde_json::from_str(input).map_err(|err| {
        if err.line() > 0 {
            GridError::parse_at(err.to_string(), err.line(), err.column())
        } else {
            GridError::parse(err.to_string())
        }
    })
}

/// Parse a table record from YAML
pub fn table_from_yaml(input: &str) -> GridResult<TableRecord> {
    serde_yaml::from_str(input).map_err(|err| match err.location() {
        Some(loc) => GridError::parse_at(err.to_string(), loc.line(), loc.column()),
        None => GridError::parse(err.to_string()),
    })
}

/// Parse a table record in the given format
pub fn table_from_str(input: &str, format: RecordFormat) -> GridResult<TableRecord> {
    match format {
        RecordFormat::Json => table_from_json(input),
        RecordFormat::Yaml => table_from_yaml(input),
    }
}

/// Parse and build a table in one step
pub fn build_from_str(
    input: &str,
    format: RecordFormat,
    options: &GridOptions,
) -> GridResult<BuildOutput> {
    let record = table_from_str(input, format)?;
    Ok(GridBuilder::with_options(options.clone()).build(record))
}

/// Serialize rendered rows as pretty JSON
pub fn rendered_to_json(rendered: &RenderedTable) -> GridResult<String> {
    serde_json::to_string_pretty(rendered)
        .map_err(|err| GridError::invalid(format!("cannot serialize table: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::Content;

    const SAMPLE: &str = r#"{
        "rows": [
            {"header": true, "cells": [{"content": [{"text": "Name"}], "colspan": 2}]},
            {"attributes": {"class": "odd"}, "cells": [
                {"content": [{"text": "a"}, "line_break", {"text": "b"}]},
                {"attributes": {"rowspan": "1", "width": 40}}
            ]}
        ]
    }"#;

    #[test]
    fn test_json_spans_accept_numbers_and_strings() {
        let record = table_from_json(SAMPLE).unwrap();
        assert_eq!(record.rows[0].cells[0].colspan.as_deref(), Some("2"));
        assert_eq!(
            record.rows[1].cells[1].attributes.get("width").map(String::as_str),
            Some("40")
        );
    }

    #[test]
    fn test_json_content_nodes() {
        let record = table_from_json(SAMPLE).unwrap();
        let content: &Content = &record.rows[1].cells[0].content;
        assert_eq!(content.plain_text(), "a\nb");
    }

    #[test]
    fn test_build_from_json() {
        let output = build_from_str(SAMPLE, RecordFormat::Json, &GridOptions::default()).unwrap();
        assert!(!output.has_warnings());
        let table = output.table;
        assert_eq!((table.row_count(), table.column_count()), (2, 2));
        let head = table.cell_at(0, 0).unwrap();
        assert_eq!(table.colspan(head), 2);
        assert_eq!(
            table.row(1).unwrap().attributes.get("class").map(String::as_str),
            Some("odd")
        );
    }

    #[test]
    fn test_yaml_records() {
        let input = "rows:\n  - cells:\n      - content: [{text: x}]\n        rowspan: 2\n  - cells: []\n";
        let record = table_from_yaml(input).unwrap();
        assert_eq!(record.rows.len(), 2);
        assert_eq!(record.rows[0].cells[0].rowspan.as_deref(), Some("2"));
    }

    #[test]
    fn test_json_error_has_location() {
        let err = table_from_json("{\"rows\": [}").unwrap_err();
        assert!(matches!(err, GridError::ParseError { line: Some(1), .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(RecordFormat::from_path("t.YML"), RecordFormat::Yaml);
        assert_eq!(RecordFormat::from_path("t.json"), RecordFormat::Json);
        assert_eq!(RecordFormat::from_path("-"), RecordFormat::Json);
    }
}
