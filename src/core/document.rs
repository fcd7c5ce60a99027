//! Minimal document around tables
//!
//! A document is a flat sequence of blocks. Tables only need it to find
//! the siblings the caret moves to when a table is removed.

use log::debug;
use std::fmt;

use super::command::EditCommand;
use super::editor::EditEffect;
use super::table::{CellId, Content, Table};

/// Stable identifier of a block within its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A top-level document block
#[derive(Debug, Clone)]
pub enum Block {
    Paragraph(Content),
    Table(Table),
}

/// Where the caret should go after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorHint {
    /// First leaf of a cell
    Cell { block: BlockId, cell: CellId },
    /// Start of a block
    Block(BlockId),
    /// The document has no blocks left
    Cleared,
}

/// Context handed to a command by the dispatcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Table block the selection lives in
    pub block: Option<BlockId>,
    /// Cell holding the caret
    pub anchor: Option<CellId>,
    /// Selected cells, in selection order
    pub cells: Vec<CellId>,
}

impl Selection {
    /// Caret inside a cell
    pub fn caret(block: BlockId, cell: CellId) -> Self {
        Selection {
            block: Some(block),
            anchor: Some(cell),
            cells: vec![cell],
        }
    }

    /// A cell selection; the first cell holds the caret
    pub fn cells(block: BlockId, cells: Vec<CellId>) -> Self {
        Selection {
            block: Some(block),
            anchor: cells.first().copied(),
            cells,
        }
    }

    fn anchor_cell(&self) -> Option<CellId> {
        self.anchor.or_else(|| self.cells.first().copied())
    }

    fn selected_cells(&self) -> Vec<CellId> {
        if self.cells.is_empty() {
            self.anchor.into_iter().collect()
        } else {
            self.cells.clone()
        }
    }
}

/// A sequence of paragraphs and tables
#[derive(Debug, Clone, Default)]
pub struct Document {
    blocks: Vec<(BlockId, Block)>,
    next_block: u32,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> BlockId {
        let id = BlockId(self.next_block);
        self.next_block += 1;
        self.blocks.push((id, block));
        id
    }

    pub fn push_paragraph(&mut self, content: impl Into<Content>) -> BlockId {
        self.push(Block::Paragraph(content.into()))
    }

    pub fn push_table(&mut self, table: Table) -> BlockId {
        self.push(Block::Table(table))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks.iter().map(|(id, block)| (*id, block))
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.index_of(id).map(|i| &self.blocks[i].1)
    }

    pub fn table(&self, id: BlockId) -> Option<&Table> {
        match self.block(id)? {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) => None,
        }
    }

    pub fn table_mut(&mut self, id: BlockId) -> Option<&mut Table> {
        let index = self.index_of(id)?;
        match &mut self.blocks[index].1 {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) => None,
        }
    }

    fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|(block, _)| *block == id)
    }

    /// Remove a table block. The caret moves to the next sibling, or the
    /// previous one when the table was last.
    pub fn delete_table(&mut self, id: BlockId) -> Option<AnchorHint> {
        let index = self.index_of(id)?;
        if !matches!(self.blocks[index].1, Block::Table(_)) {
            debug!("delete table: block {} is not a table", id);
            return None;
        }
        self.blocks.remove(index);

        let sibling = self
            .blocks
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|i| self.blocks.get(i)))
            .map(|(sibling, _)| *sibling);
        Some(match sibling {
            Some(block) => AnchorHint::Block(block),
            None => AnchorHint::Cleared,
        })
    }

    /// Run a command against the table the selection points at.
    ///
    /// Returns `None` when nothing changed.
    pub fn execute(&mut self, command: EditCommand, selection: &Selection) -> Option<AnchorHint> {
        let Some(block) = selection.block else {
            debug!("{}: selection is not inside a table", command);
            return None;
        };
        if command == EditCommand::DeleteTable {
            return self.delete_table(block);
        }

        let table = self.table_mut(block)?;
        let effect = if command.uses_selection() {
            let cells = selection.selected_cells();
            match command {
                EditCommand::MergeCells => table.merge_cells(&cells),
                _ => table.unmerge_cells(&cells),
            }
        } else {
            let Some(anchor) = selection.anchor_cell() else {
                debug!("{}: no anchor cell", command);
                return None;
            };
            match command {
                EditCommand::AddRowAbove => table.add_row_above(anchor),
                EditCommand::AddRowBelow => table.add_row_below(anchor),
                EditCommand::AddColumnBefore => table.add_column_before(anchor),
                EditCommand::AddColumnAfter => table.add_column_after(anchor),
                EditCommand::DeleteRow => table.delete_row(anchor),
                _ => table.delete_column(anchor),
            }
        };

        match effect {
            EditEffect::Unchanged => None,
            EditEffect::RemoveTable => self.delete_table(block),
            EditEffect::Edited { anchor } => Some(match anchor {
                Some(cell) => AnchorHint::Cell { block, cell },
                None => AnchorHint::Block(block),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_table(rows: usize, columns: usize) -> (Document, BlockId, BlockId, BlockId) {
        let mut doc = Document::new();
        let before = doc.push_paragraph("before");
        let table = doc.push_table(Table::uniform(rows, columns));
        let after = doc.push_paragraph("after");
        (doc, before, table, after)
    }

    #[test]
    fn test_delete_table_moves_to_next_sibling() {
        let (mut doc, _, table, after) = doc_with_table(1, 1);
        assert_eq!(doc.delete_table(table), Some(AnchorHint::Block(after)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_delete_last_table_moves_to_previous_sibling() {
        let mut doc = Document::new();
        let before = doc.push_paragraph("before");
        let table = doc.push_table(Table::uniform(2, 2));
        assert_eq!(doc.delete_table(table), Some(AnchorHint::Block(before)));
    }

    #[test]
    fn test_delete_only_block_clears_document() {
        let mut doc = Document::new();
        let table = doc.push_table(Table::uniform(1, 1));
        assert_eq!(doc.delete_table(table), Some(AnchorHint::Cleared));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_delete_table_ignores_paragraphs() {
        let (mut doc, before, _, _) = doc_with_table(1, 1);
        assert_eq!(doc.delete_table(before), None);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_delete_sole_row_removes_table() {
        let (mut doc, _, table, after) = doc_with_table(1, 3);
        let cell = doc.table(table).unwrap().cell_at(0, 1).unwrap();
        let hint = doc.execute(EditCommand::DeleteRow, &Selection::caret(table, cell));
        assert_eq!(hint, Some(AnchorHint::Block(after)));
        assert!(doc.table(table).is_none());
    }

    #[test]
    fn test_execute_without_block_is_noop() {
        let (mut doc, _, _, _) = doc_with_table(2, 2);
        assert_eq!(doc.execute(EditCommand::AddRowBelow, &Selection::default()), None);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_execute_reports_anchor_cell() {
        let (mut doc, _, table, _) = doc_with_table(2, 2);
        let cell = doc.table(table).unwrap().cell_at(1, 1).unwrap();
        let hint = doc.execute(EditCommand::AddColumnAfter, &Selection::caret(table, cell));
        assert_eq!(hint, Some(AnchorHint::Cell { block: table, cell }));
        assert_eq!(doc.table(table).unwrap().column_count(), 3);
    }
}
