//! Table edit commands exposed to the dispatcher

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use super::document::{BlockId, Selection};
use super::table::{selection_rectangle, GridPos, Table};
use crate::data::commands::{lookup_command, suggest_command};
use crate::utils::error::{GridError, GridResult};

lazy_static! {
    // Command line: name [row,col [row,col]]
    static ref COMMAND_LINE: Regex = Regex::new(
        r"^\s*([A-Za-z][A-Za-z_\-]*)(?:\s+(\d+)\s*,\s*(\d+))?(?:\s+(\d+)\s*,\s*(\d+))?\s*$"
    ).unwrap();
}

/// A structural table command.
///
/// The names returned by [`EditCommand::name`] are the stable contract with
/// the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    AddRowAbove,
    AddRowBelow,
    AddColumnBefore,
    AddColumnAfter,
    DeleteRow,
    DeleteColumn,
    DeleteTable,
    MergeCells,
    UnmergeCells,
}

impl EditCommand {
    pub const ALL: [EditCommand; 9] = [
        EditCommand::AddRowAbove,
        EditCommand::AddRowBelow,
        EditCommand::AddColumnBefore,
        EditCommand::AddColumnAfter,
        EditCommand::DeleteRow,
        EditCommand::DeleteColumn,
        EditCommand::DeleteTable,
        EditCommand::MergeCells,
        EditCommand::UnmergeCells,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EditCommand::AddRowAbove => "addRowAbove",
            EditCommand::AddRowBelow => "addRowBelow",
            EditCommand::AddColumnBefore => "addColumnBefore",
            EditCommand::AddColumnAfter => "addColumnAfter",
            EditCommand::DeleteRow => "deleteRow",
            EditCommand::DeleteColumn => "deleteColumn",
            EditCommand::DeleteTable => "deleteTable",
            EditCommand::MergeCells => "mergeCells",
            EditCommand::UnmergeCells => "unmergeCells",
        }
    }

    /// Resolve a dispatcher name
    pub fn from_name(name: &str) -> GridResult<Self> {
        if let Some(command) = lookup_command(name) {
            return Ok(command);
        }
        match suggest_command(name) {
            Some(known) => Err(GridError::unknown_command_with_suggestion(name, known)),
            None => Err(GridError::unknown_command(name)),
        }
    }

    /// Whether the command works on a cell selection rather than an anchor
    pub fn uses_selection(self) -> bool {
        matches!(self, EditCommand::MergeCells | EditCommand::UnmergeCells)
    }
}

impl fmt::Display for EditCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditCommand {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditCommand::from_name(s)
    }
}

/// A command with grid coordinates, as written in edit scripts:
///
/// ```text
/// addRowBelow 0,1
/// mergeCells 0,0 1,2
/// deleteTable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandLine {
    pub command: EditCommand,
    /// Anchor cell, or the first corner of a selection
    pub from: Option<GridPos>,
    /// Opposite corner of a selection
    pub to: Option<GridPos>,
}

impl CommandLine {
    pub fn parse(line: &str) -> GridResult<Self> {
        let caps = COMMAND_LINE
            .captures(line)
            .ok_or_else(|| GridError::parse(format!("malformed command line '{}'", line.trim())))?;
        let command = EditCommand::from_name(&caps[1])?;

        let coords = |row: usize, column: usize| -> GridResult<Option<GridPos>> {
            match (caps.get(row), caps.get(column)) {
                (Some(r), Some(c)) => Ok(Some(GridPos::new(
                    parse_index(r.as_str())?,
                    parse_index(c.as_str())?,
                ))),
                _ => Ok(None),
            }
        };
        Ok(CommandLine {
            command,
            from: coords(2, 3)?,
            to: coords(4, 5)?,
        })
    }

    /// Resolve the coordinates against `table`, which lives in `block`.
    ///
    /// Two corners select the smallest rectangle around them that no merged
    /// cell straddles. Coordinates outside the grid give an anchorless
    /// selection, which every command ignores.
    pub fn selection(&self, table: &Table, block: BlockId) -> Selection {
        let cell = |pos: Option<GridPos>| pos.and_then(|p| table.cell_at(p.row, p.column));
        let mut selection = Selection {
            block: Some(block),
            ..Selection::default()
        };
        match (cell(self.from), self.to.map(|_| cell(self.to))) {
            (Some(anchor), None) => {
                selection.anchor = Some(anchor);
                selection.cells = vec![anchor];
            }
            (Some(anchor), Some(Some(corner))) => {
                selection.anchor = Some(anchor);
                selection.cells = selection_rectangle(table, anchor, corner);
            }
            _ => {}
        }
        selection
    }
}

impl FromStr for CommandLine {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandLine::parse(s)
    }
}

fn parse_index(digits: &str) -> GridResult<usize> {
    digits
        .parse()
        .map_err(|_| GridError::parse(format!("grid index '{}' is out of range", digits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for command in EditCommand::ALL {
            assert_eq!(EditCommand::from_name(command.name()).unwrap(), command);
        }
    }

    #[test]
    fn test_unknown_name_suggests() {
        let err = "add_row_below".parse::<EditCommand>().unwrap_err();
        assert!(err.to_string().contains("addRowBelow"));

        let err = "splitCell".parse::<EditCommand>().unwrap_err();
        assert!(matches!(
            err,
            GridError::UnknownCommand {
                suggestion: None,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_command_lines() {
        let line = CommandLine::parse("  mergeCells 0,1  2, 3 ").unwrap();
        assert_eq!(line.command, EditCommand::MergeCells);
        assert_eq!(line.from, Some(GridPos::new(0, 1)));
        assert_eq!(line.to, Some(GridPos::new(2, 3)));

        let line: CommandLine = "deleteTable".parse().unwrap();
        assert_eq!((line.from, line.to), (None, None));

        assert!(matches!(
            CommandLine::parse("addRowAbove 1"),
            Err(GridError::ParseError { .. })
        ));
        assert!(matches!(
            CommandLine::parse("addRowAbvoe 1,1"),
            Err(GridError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_selection_from_coordinates() {
        let mut table = Table::uniform(3, 3);
        let tall = table.cell_at(0, 1).unwrap();
        let below = table.cell_at(1, 1).unwrap();
        table.merge_with(below, tall);

        let mut doc = crate::core::document::Document::new();
        let block = doc.push_table(Table::new());

        let caret = CommandLine::parse("addRowBelow 2,2").unwrap().selection(&table, block);
        assert_eq!(caret.anchor, table.cell_at(2, 2));
        assert_eq!(caret.cells.len(), 1);

        let rect = CommandLine::parse("mergeCells 1,0 1,1").unwrap().selection(&table, block);
        assert_eq!(rect.cells.len(), 3);
        assert!(rect.cells.contains(&tall));

        let outside = CommandLine::parse("deleteRow 9,9").unwrap().selection(&table, block);
        assert_eq!(outside.anchor, None);
        assert!(outside.cells.is_empty());
    }
}
