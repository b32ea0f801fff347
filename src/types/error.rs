//! Error types for the debt ledger engine
//!
//! This module defines every error the engine can report. Errors are designed
//! to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Validation Errors**: structural ledger problems (missing columns, empty or
//!   duplicate participants, unknown participant names). Fatal to a computation.
//! - **Arithmetic Errors**: a debt sum leaving the `Decimal` range. Fatal to a
//!   computation.
//! - **Cell Parse Errors**: a non-numeric total or contribution cell. Never
//!   propagated; the engine logs them and treats the cell as absent.
//! - **File I/O Errors**: file not found, permission denied, etc.
//! - **CSV Parsing Errors**: malformed header or records.

use thiserror::Error;

/// Main error type for the debt ledger engine
///
/// Each variant includes enough context to locate the offending column,
/// participant or row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// A structural column the engine relies on is absent from the header
    ///
    /// This is a validation error and aborts the computation.
    #[error("Required column '{column}' is missing from the ledger")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// The resolved participant set is empty
    ///
    /// Either the ledger has no columns past the reserved ones, or the
    /// caller selected nobody. This is a validation error.
    #[error("Ledger has no participant columns to split expenses between")]
    NoParticipants,

    /// The same participant header appears more than once
    #[error("Participant '{participant}' appears more than once in the ledger header")]
    DuplicateParticipant {
        /// The duplicated participant name
        participant: String,
    },

    /// A participant column reuses the name of a reserved column
    ///
    /// Rows are keyed by column name, so such a column would shadow the
    /// reserved cell. This is a validation error.
    #[error("Participant column '{participant}' reuses a reserved column name")]
    ReservedColumnName {
        /// The offending participant name
        participant: String,
    },

    /// A participant name was requested that the ledger does not contain
    #[error("Unknown participant '{participant}'")]
    UnknownParticipant {
        /// The requested participant name
        participant: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The computation is aborted rather than producing a wrong matrix.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// A cell that should hold a number holds something else
    ///
    /// This error is only ever logged. The cell is treated as zero/absent
    /// and computation continues.
    #[error("Row {row}: column '{column}' holds non-numeric value '{value}'")]
    CellParse {
        /// 1-based data row number
        row: usize,
        /// Column holding the value
        column: String,
        /// The raw cell text
        value: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for LedgerError {
    fn from(error: csv_async::Error) -> Self {
        // The async error message already carries its position
        LedgerError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a MissingColumn error
    pub fn missing_column(column: &str) -> Self {
        LedgerError::MissingColumn {
            column: column.to_string(),
        }
    }

    /// Create a DuplicateParticipant error
    pub fn duplicate_participant(participant: &str) -> Self {
        LedgerError::DuplicateParticipant {
            participant: participant.to_string(),
        }
    }

    /// Create a ReservedColumnName error
    pub fn reserved_column_name(participant: &str) -> Self {
        LedgerError::ReservedColumnName {
            participant: participant.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create an UnknownParticipant error
    pub fn unknown_participant(participant: &str) -> Self {
        LedgerError::UnknownParticipant {
            participant: participant.to_string(),
        }
    }

    /// Create a CellParse error
    pub fn cell_parse(row: usize, column: &str, value: &str) -> Self {
        LedgerError::CellParse {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether this error describes a structural problem with the ledger
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::MissingColumn { .. }
                | LedgerError::NoParticipants
                | LedgerError::DuplicateParticipant { .. }
                | LedgerError::ReservedColumnName { .. }
                | LedgerError::UnknownParticipant { .. }
        )
    }
}
