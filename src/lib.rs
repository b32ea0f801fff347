//! Debt Ledger Engine Library
//! # Overview
//!
//! This library works out who owes whom from a shared expense ledger, with a
//! sync and an async batch strategy over streaming CSV input.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (CellValue, LedgerRow, DebtMatrix, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Debt accounting components:
//!   - [`core::payer`] - Who paid for a row
//!   - [`core::share`] - How much each participant's share is
//!   - [`core::accumulator`] - Directional (gross) debts
//!   - [`core::netting`] - Net debts between every pair
//!   - [`core::engine`] - Validation, orchestration and queries
//! - [`io`] - CSV ledger reading and report writing
//! - [`strategy`] - Sync and async end-to-end pipelines
//!
//! # Ledger Layout
//!
//! One row per expense. The structural columns are a label, the total and
//! a legacy participant count; every column after them is a participant.
//!
//! - A **negative** cell marks the payer (the first one wins)
//! - A **positive** cell marks a beneficiary who owes the payer a share
//! - An empty cell means the participant was not involved
//!
//! # Debts
//!
//! - `gross[d][c]`: everything `d` owes `c`, summed over rows
//! - `net[d][c] = gross[d][c] - gross[c][d]`: positive means `d` owes `c`

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{DebtAccumulator, DebtLedgerEngine, NettingEngine, PayerResolver, ShareCalculator};
pub use io::write_report;
pub use types::{
    CellValue, DebtMatrix, DebtReport, Ledger, LedgerError, LedgerRow, LedgerSchema, Participant,
    RowSummary, ShareBasis, TableRow,
};
