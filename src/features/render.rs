//! Table rendering
//!
//! Turns a [`Table`] into the shape a rendering surface consumes: only
//! active cells are emitted, each carrying its derived spans as
//! attributes. Managed cells render nothing.
//!
//! ## Example
//!
//! ```rust
//! use tablegrid::core::table::Table;
//! use tablegrid::core::options::RenderOptions;
//! use tablegrid::render::table_to_html;
//!
//! let mut table = Table::uniform(1, 2);
//! let a = table.cell_at(0, 0).unwrap();
//! let b = table.cell_at(0, 1).unwrap();
//! table.merge_with(b, a);
//!
//! let html = table_to_html(&table, &RenderOptions::compact());
//! assert_eq!(html, r#"<table><tr><td colspan="2"></td></tr></table>"#);
//! ```

use std::fmt::Write;

use crate::core::options::RenderOptions;
use crate::core::table::{Attributes, Content, Inline, Table};
use crate::data::constants::{escape_html, COLSPAN_ATTR, ROWSPAN_ATTR, TAG_DATA, TAG_HEADER};

/// An active cell as seen by the renderer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedCell {
    /// `"TH"` or `"TD"`
    pub tag: &'static str,
    /// Cell attributes plus `colspan`/`rowspan` when above 1
    pub attributes: Attributes,
    pub children: Content,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedRow {
    pub header: bool,
    pub attributes: Attributes,
    pub cells: Vec<RenderedCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedTable {
    pub rows: Vec<RenderedRow>,
}

/// Collect the renderable view of a table.
///
/// Rows whose slots are all managed are kept as empty rows so that the
/// row spans reaching into them stay meaningful.
pub fn render_table(table: &Table) -> RenderedTable {
    let rows = table
        .rows()
        .iter()
        .map(|row| RenderedRow {
            header: row.header,
            attributes: row.attributes.clone(),
            cells: row
                .cells()
                .iter()
                .copied()
                .filter(|&id| table.is_active(id))
                .filter_map(|id| {
                    let cell = table.cell(id)?;
                    let mut attributes = cell.attributes.clone();
                    let colspan = table.colspan(id);
                    let rowspan = table.rowspan(id);
                    if colspan > 1 {
                        attributes.insert(COLSPAN_ATTR.to_string(), colspan.to_string());
                    }
                    if rowspan > 1 {
                        attributes.insert(ROWSPAN_ATTR.to_string(), rowspan.to_string());
                    }
                    Some(RenderedCell {
                        tag: if cell.header { TAG_HEADER } else { TAG_DATA },
                        attributes,
                        children: cell.content.clone(),
                    })
                })
                .collect(),
        })
        .collect();
    RenderedTable { rows }
}

/// Render a table straight to HTML
pub fn table_to_html(table: &Table, options: &RenderOptions) -> String {
    to_html(&render_table(table), options)
}

/// Write rendered rows as HTML markup
pub fn to_html(rendered: &RenderedTable, options: &RenderOptions) -> String {
    let mut w = HtmlWriter::new(options.indent);
    w.open("table", &Attributes::new());

    let head_len = if options.sections {
        rendered.rows.iter().take_while(|row| row.header).count()
    } else {
        0
    };
    let (head, body) = rendered.rows.split_at(head_len);

    if options.sections {
        if !head.is_empty() {
            w.open("thead", &Attributes::new());
            write_rows(&mut w, head);
            w.close("thead");
        }
        if !body.is_empty() {
            w.open("tbody", &Attributes::new());
            write_rows(&mut w, body);
            w.close("tbody");
        }
    } else {
        write_rows(&mut w, body);
    }

    w.close("table");
    w.finish()
}

fn write_rows(w: &mut HtmlWriter, rows: &[RenderedRow]) {
    for row in rows {
        w.open("tr", &row.attributes);
        for cell in &row.cells {
            let tag = cell.tag.to_ascii_lowercase();
            w.leaf(&tag, &cell.attributes, &content_html(&cell.children));
        }
        w.close("tr");
    }
}

fn content_html(content: &Content) -> String {
    let mut out = String::new();
    for node in content.nodes() {
        match node {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::LineBreak => out.push_str("<br>"),
        }
    }
    out
}

/// Minimal indenting markup writer
struct HtmlWriter {
    out: String,
    indent: Option<usize>,
    depth: usize,
}

impl HtmlWriter {
    fn new(indent: Option<usize>) -> Self {
        HtmlWriter {
            out: String::new(),
            indent,
            depth: 0,
        }
    }

    fn pad(&mut self) {
        if let Some(width) = self.indent {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            self.out.push_str(&" ".repeat(width * self.depth));
        }
    }

    fn start_tag(&mut self, tag: &str, attributes: &Attributes) {
        let _ = write!(self.out, "<{}", tag);
        for (key, value) in attributes {
            let _ = write!(self.out, " {}=\"{}\"", key, escape_html(value));
        }
        self.out.push('>');
    }

    fn open(&mut self, tag: &str, attributes: &Attributes) {
        self.pad();
        self.start_tag(tag, attributes);
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.pad();
        let _ = write!(self.out, "</{}>", tag);
    }

    fn leaf(&mut self, tag: &str, attributes: &Attributes, inner: &str) {
        self.pad();
        self.start_tag(tag, attributes);
        self.out.push_str(inner);
        let _ = write!(self.out, "</{}>", tag);
    }

    fn finish(mut self) -> String {
        if self.indent.is_some() {
            self.out.push('\n');
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{CellRecord, GridBuilder, RowRecord, TableRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_managed_cells_render_nothing() {
        let mut table = Table::uniform(2, 2);
        let a = table.cell_at(0, 0).unwrap();
        let c = table.cell_at(1, 0).unwrap();
        table.merge_with(c, a);

        let rendered = render_table(&table);
        assert_eq!(rendered.rows[0].cells.len(), 2);
        assert_eq!(rendered.rows[1].cells.len(), 1);
        assert_eq!(
            rendered.rows[0].cells[0].attributes.get("rowspan").map(String::as_str),
            Some("2")
        );
        assert!(!rendered.rows[0].cells[1].attributes.contains_key("rowspan"));
    }

    #[test]
    fn test_header_cells_use_th() {
        let record = TableRecord::new(vec![
            RowRecord::header(vec![CellRecord::new("Name"), CellRecord::new("Qty")]),
            RowRecord::new(vec![CellRecord::new("apple"), CellRecord::new("3")]),
        ]);
        let table = GridBuilder::new().build_table(record);
        let rendered = render_table(&table);
        assert_eq!(rendered.rows[0].cells[0].tag, "TH");
        assert_eq!(rendered.rows[1].cells[0].tag, "TD");
    }

    #[test]
    fn test_html_sections_and_escaping() {
        let record = TableRecord::new(vec![
            RowRecord::header(vec![CellRecord::new("a<b").with_colspan(2)]),
            RowRecord::new(vec![
                CellRecord::new("x").with_attribute("class", "n&m"),
                CellRecord::new("y"),
            ]),
        ]);
        let table = GridBuilder::new().build_table(record);
        let html = table_to_html(&table, &RenderOptions::default());
        let expected = "\
<table>
  <thead>
    <tr>
      <th colspan=\"2\">a&lt;b</th>
    </tr>
  </thead>
  <tbody>
    <tr>
      <td class=\"n&amp;m\">x</td>
      <td>y</td>
    </tr>
  </tbody>
</table>
";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_line_breaks_render_as_br() {
        let mut table = Table::uniform(1, 2);
        let a = table.cell_at(0, 0).unwrap();
        let b = table.cell_at(0, 1).unwrap();
        table.cell_mut(a).unwrap().content = Content::text("ab");
        table.cell_mut(b).unwrap().content = Content::text("cd");
        table.merge_cells(&[a, b]);

        let html = table_to_html(&table, &RenderOptions::compact());
        assert_eq!(html, "<table><tr><td colspan=\"2\">ab<br>cd</td></tr></table>");
    }
}
