//! Error handling for Tablegrid
//!
//! Grid operations never fail: malformed input and impossible edits are
//! recovered from or ignored. This module covers the fallible surfaces
//! around them (record loading, command parsing, file I/O) and the
//! non-fatal warnings collected while building a grid.

use std::fmt;

/// Tablegrid error type
#[derive(Debug, Clone)]
pub enum GridError {
    /// Parse error - record input could not be parsed
    ParseError {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Unknown command name
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },
    /// Invalid input
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ParseError {
                message,
                line,
                column,
            } => {
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, "Parse error at line {}, column {}: {}", l, c, message)
                } else if let Some(l) = line {
                    write!(f, "Parse error at line {}: {}", l, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            GridError::UnknownCommand { name, suggestion } => {
                if let Some(sug) = suggestion {
                    write!(f, "Unknown command '{}'. Did you mean '{}'?", name, sug)
                } else {
                    write!(f, "Unknown command: {}", name)
                }
            }
            GridError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            GridError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for GridError {}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for fallible operations
pub type GridResult<T> = Result<T, GridError>;

/// Build warnings (recovered malformed input)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildWarning {
    pub message: String,
    /// Grid row the warning refers to (0-indexed)
    pub row: Option<usize>,
    /// Grid column the warning refers to (0-indexed)
    pub column: Option<usize>,
}

impl BuildWarning {
    pub fn new(message: impl Into<String>) -> Self {
        BuildWarning {
            message: message.into(),
            row: None,
            column: None,
        }
    }

    pub fn at(message: impl Into<String>, row: usize, column: usize) -> Self {
        BuildWarning {
            message: message.into(),
            row: Some(row),
            column: Some(column),
        }
    }

    pub fn in_row(message: impl Into<String>, row: usize) -> Self {
        BuildWarning {
            message: message.into(),
            row: Some(row),
            column: None,
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.row, self.column) {
            (Some(r), Some(c)) => write!(f, "Warning at row {}, column {}: {}", r, c, self.message),
            (Some(r), None) => write!(f, "Warning at row {}: {}", r, self.message),
            _ => write!(f, "Warning: {}", self.message),
        }
    }
}

// Convenience constructors for errors
impl GridError {
    pub fn parse(message: impl Into<String>) -> Self {
        GridError::ParseError {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        GridError::ParseError {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn unknown_command(name: impl Into<String>) -> Self {
        GridError::UnknownCommand {
            name: name.into(),
            suggestion: None,
        }
    }

    pub fn unknown_command_with_suggestion(
        name: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        GridError::UnknownCommand {
            name: name.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        GridError::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = GridError::parse("unexpected token");
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_parse_error_with_location() {
        let err = GridError::parse_at("expected `rows`", 10, 5);
        let msg = err.to_string();
        assert!(msg.contains("line 10"));
        assert!(msg.contains("column 5"));
    }

    #[test]
    fn test_unknown_command_suggestion() {
        let err = GridError::unknown_command_with_suggestion("addrowabove", "addRowAbove");
        let msg = err.to_string();
        assert!(msg.contains("addrowabove"));
        assert!(msg.contains("Did you mean 'addRowAbove'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: GridError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_build_warning_display() {
        let warn = BuildWarning::at("span clipped", 1, 2);
        assert_eq!(warn.to_string(), "Warning at row 1, column 2: span clipped");
        let warn = BuildWarning::in_row("cell dropped", 3);
        assert_eq!(warn.to_string(), "Warning at row 3: cell dropped");
    }
}
