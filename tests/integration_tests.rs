//! Integration tests for table building, editing and rendering

use tablegrid::{
    build_table, build_table_with_warnings,
    diagnostics::{check_table, format_diagnostics},
    render::{render_table, table_to_html},
    render_html, AnchorHint, CellRecord, CommandLine, Document, EditCommand, RenderOptions,
    RowRecord, Selection, Table, TableRecord,
};

fn texts(items: &[&str]) -> Vec<CellRecord> {
    items.iter().map(|t| CellRecord::new(*t)).collect()
}

fn assert_clean(table: &Table) {
    let result = check_table(table);
    assert!(result.is_empty(), "{}", format_diagnostics(&result, false));
}

// ============================================================================
// Building
// ============================================================================

mod building {
    use super::*;

    #[test]
    fn test_ragged_input_becomes_rectangular() {
        let output = build_table_with_warnings(TableRecord::new(vec![
            RowRecord::new(vec![CellRecord::new("a").with_rowspan(2), CellRecord::new("b")]),
            RowRecord::new(Vec::new()),
            RowRecord::new(texts(&["c", "d", "e"])),
        ]));

        let table = &output.table;
        assert_eq!((table.row_count(), table.column_count()), (3, 2));
        assert!(table.rows().iter().all(|row| row.len() == 2));
        // (1, 1) patched, "e" dropped
        assert_eq!(output.warnings.len(), 2);
        assert_clean(table);
    }

    #[test]
    fn test_every_slot_has_one_root() {
        let table = build_table(TableRecord::new(vec![
            RowRecord::new(vec![
                CellRecord::new("x").with_colspan(2).with_rowspan(2),
                CellRecord::new("y"),
            ]),
            RowRecord::new(texts(&["z"])),
        ]));

        let covered: usize = table
            .active_cells()
            .into_iter()
            .map(|cell| table.colspan(cell) * table.rowspan(cell))
            .sum();
        assert_eq!(covered, table.row_count() * table.column_count());
    }
}

// ============================================================================
// Commands through the document
// ============================================================================

mod commands {
    use super::*;

    fn doc_with(table: Table) -> (Document, tablegrid::BlockId) {
        let mut doc = Document::new();
        doc.push_paragraph("intro");
        let block = doc.push_table(table);
        (doc, block)
    }

    #[test]
    fn test_merge_and_unmerge() {
        let table = build_table(TableRecord::new(vec![RowRecord::new(texts(&["ab", "cd"]))]));
        let a = table.cell_at(0, 0).unwrap();
        let b = table.cell_at(0, 1).unwrap();
        let (mut doc, block) = doc_with(table);

        let hint = doc.execute(EditCommand::MergeCells, &Selection::cells(block, vec![a, b]));
        assert_eq!(hint, Some(AnchorHint::Cell { block, cell: a }));
        assert_eq!(
            render_html(doc.table(block).unwrap()),
            "<table>\n  <tbody>\n    <tr>\n      <td colspan=\"2\">ab<br>cd</td>\n    </tr>\n  </tbody>\n</table>\n"
        );

        let hint = doc.execute(EditCommand::UnmergeCells, &Selection::caret(block, a));
        assert_eq!(hint, Some(AnchorHint::Cell { block, cell: a }));
        let table = doc.table(block).unwrap();
        assert_eq!(table.active_cells().len(), 2);
        assert_clean(table);
    }

    #[test]
    fn test_deleting_last_row_removes_table() {
        let table = Table::uniform(1, 2);
        let cell = table.cell_at(0, 1).unwrap();
        let (mut doc, block) = doc_with(table);
        let intro = doc.blocks().next().map(|(id, _)| id).unwrap();

        let hint = doc.execute(EditCommand::DeleteRow, &Selection::caret(block, cell));
        assert_eq!(hint, Some(AnchorHint::Block(intro)));
        assert!(doc.table(block).is_none());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_delete_table_command() {
        let (mut doc, block) = doc_with(Table::uniform(2, 2));
        let selection = Selection {
            block: Some(block),
            ..Selection::default()
        };
        let hint = doc.execute(EditCommand::DeleteTable, &selection);
        assert!(matches!(hint, Some(AnchorHint::Block(_))));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_speculative_commands_are_harmless() {
        let (mut doc, block) = doc_with(Table::uniform(2, 2));
        let stranger = Selection {
            block: Some(block),
            anchor: None,
            cells: Vec::new(),
        };
        for command in EditCommand::ALL {
            if command == EditCommand::DeleteTable {
                continue;
            }
            assert_eq!(doc.execute(command, &stranger), None, "{}", command);
        }
        assert_eq!(doc.execute(EditCommand::AddRowAbove, &Selection::default()), None);
        assert_eq!(doc.table(block).unwrap().row_count(), 2);
    }

    #[test]
    fn test_cells_from_another_table_are_ignored() {
        let mut first = Table::uniform(2, 2);
        let root = first.cell_at(0, 0).unwrap();
        first.merge_cells(&[root, first.cell_at(0, 1).unwrap()]);
        let stranger = first.cell_at(1, 1).unwrap();
        let strangers = first.active_cells();

        let (mut doc, first_block) = doc_with(first);
        let second = doc.push_table(Table::uniform(2, 2));

        for command in EditCommand::ALL {
            if command == EditCommand::DeleteTable {
                continue;
            }
            let selection = if command.uses_selection() {
                Selection::cells(second, strangers.clone())
            } else {
                Selection::caret(second, stranger)
            };
            assert_eq!(doc.execute(command, &selection), None, "{}", command);
        }

        let table = doc.table(second).unwrap();
        assert_eq!((table.row_count(), table.column_count()), (2, 2));
        assert_eq!(table.active_cells().len(), 4);
        assert_eq!(doc.table(first_block).unwrap().colspan(root), 2);
        assert_clean(table);
    }

    #[test]
    fn test_scripted_edits() {
        let table = build_table(TableRecord::new(vec![
            RowRecord::header(texts(&["Name", "Qty", "Price"])),
            RowRecord::new(texts(&["apple", "3", "1.20"])),
            RowRecord::new(texts(&["pear", "5", "0.80"])),
        ]));
        let (mut doc, block) = doc_with(table);

        for line in ["addRowBelow 2,0", "mergeCells 1,1 2,2", "deleteColumn 0,0"] {
            let line = CommandLine::parse(line).unwrap();
            let selection = line.selection(doc.table(block).unwrap(), block);
            assert!(doc.execute(line.command, &selection).is_some(), "{}", line.command);
        }

        let table = doc.table(block).unwrap();
        assert_eq!((table.row_count(), table.column_count()), (4, 2));
        let merged = table.cell_at(1, 0).unwrap();
        assert_eq!((table.rowspan(merged), table.colspan(merged)), (2, 2));
        assert_eq!(
            table.cell(merged).unwrap().content.plain_text(),
            "3\n1.20\n5\n0.80"
        );
        assert_clean(table);
    }
}

// ============================================================================
// Rendering
// ============================================================================

mod rendering {
    use super::*;

    #[test]
    fn test_managed_cells_are_not_rendered() {
        let table = build_table(TableRecord::new(vec![
            RowRecord::new(vec![CellRecord::new("A").with_rowspan(2), CellRecord::new("b")]),
            RowRecord::new(texts(&["c"])),
        ]));
        let rendered = render_table(&table);
        let counts: Vec<usize> = rendered.rows.iter().map(|row| row.cells.len()).collect();
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn test_compact_html() {
        let table = build_table(TableRecord::new(vec![RowRecord::header(texts(&["h"]))]));
        assert_eq!(
            table_to_html(&table, &RenderOptions::compact()),
            "<table><tr><th>h</th></tr></table>"
        );
    }
}

// ============================================================================
// Record loading
// ============================================================================

#[cfg(feature = "data-loading")]
mod records {
    use super::*;
    use tablegrid::records::{build_from_str, RecordFormat};
    use tablegrid::GridOptions;

    #[test]
    fn test_yaml_pipeline() {
        let input = "\
rows:
  - header: true
    cells:
      - content: [{text: Region}]
        header: true
        colspan: 2
  - cells:
      - content: [{text: north}]
      - content: [{text: '12'}]
";
        let output = build_from_str(input, RecordFormat::Yaml, &GridOptions::default()).unwrap();
        assert!(!output.has_warnings());
        let html = table_to_html(&output.table, &RenderOptions::compact());
        assert_eq!(
            html,
            "<table><tr><th colspan=\"2\">Region</th></tr><tr><td>north</td><td>12</td></tr></table>"
        );
    }

    #[test]
    fn test_malformed_records_are_errors() {
        assert!(build_from_str("rows: 3", RecordFormat::Yaml, &GridOptions::default()).is_err());
    }
}
