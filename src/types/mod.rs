//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `cell`: tagged ledger cell values and their coercions
//! - `ledger`: the tabular ledger, its schema and validated expense rows
//! - `matrix`: the participant × participant debt matrix
//! - `report`: computation results
//! - `error`: Error types for the engine

pub mod cell;
pub mod error;
pub mod ledger;
pub mod matrix;
pub mod report;

pub use cell::CellValue;
pub use error::LedgerError;
pub use ledger::{table_row, Ledger, LedgerRow, LedgerSchema, Participant, ShareBasis, TableRow};
pub use matrix::DebtMatrix;
pub use report::{DebtReport, RowSummary};
