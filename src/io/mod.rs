//! I/O module
//!
//! Handles CSV ledger parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, report serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_csv_record, format_amount, write_debts_csv, write_matrix_csv, write_report,
    write_shares_csv,
};
pub use sync_reader::SyncReader;
