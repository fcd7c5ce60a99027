//! Command name table
//!
//! The names are the stable contract with the command dispatcher.

use phf::phf_map;

use crate::core::command::EditCommand;

/// Dispatcher name to command
pub static COMMAND_NAMES: phf::Map<&'static str, EditCommand> = phf_map! {
    "addRowAbove" => EditCommand::AddRowAbove,
    "addRowBelow" => EditCommand::AddRowBelow,
    "addColumnBefore" => EditCommand::AddColumnBefore,
    "addColumnAfter" => EditCommand::AddColumnAfter,
    "deleteRow" => EditCommand::DeleteRow,
    "deleteColumn" => EditCommand::DeleteColumn,
    "deleteTable" => EditCommand::DeleteTable,
    "mergeCells" => EditCommand::MergeCells,
    "unmergeCells" => EditCommand::UnmergeCells,
};

/// Look up a command by its exact name
pub fn lookup_command(name: &str) -> Option<EditCommand> {
    COMMAND_NAMES.get(name).copied()
}

/// Find the command whose name matches `name` ignoring case and separators
pub fn suggest_command(name: &str) -> Option<&'static str> {
    let wanted = normalize(name);
    COMMAND_NAMES
        .keys()
        .find(|known| normalize(known) == wanted)
        .copied()
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
