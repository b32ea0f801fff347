//! Synchronous CSV ledger reader with iterator interface
//!
//! Provides a streaming iterator over ledger rows from a CSV file. The first
//! record is the header; every following record becomes a `TableRow` keyed by
//! those header names.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<TableRow, LedgerError>` for each CSV row:
//!
//! ```no_run
//! use debt_ledger_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("ledger.csv")).unwrap();
//! println!("columns: {:?}", reader.columns());
//! for result in reader {
//!     match result {
//!         Ok(row) => println!("row: {:?}", row),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable header) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator

use crate::io::csv_format::{convert_csv_record, header_columns};
use crate::types::{Ledger, LedgerError, TableRow};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV ledger reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    columns: Vec<String>,
    record: StringRecord,
}

impl SyncReader {
    /// Open a CSV ledger and read its header
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing blank cells may be omitted)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the path does not exist, `IoError` for other
    /// open failures and `ParseError` if the header cannot be read.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        let columns = header_columns(reader.headers()?.iter());

        Ok(Self {
            reader,
            columns,
            record: StringRecord::new(),
        })
    }

    /// Header names in column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Read the whole file into a `Ledger`
    ///
    /// Malformed records are logged and skipped.
    pub fn read_ledger(path: &Path) -> Result<Ledger, LedgerError> {
        let reader = SyncReader::new(path)?;
        let mut ledger = Ledger::new(reader.columns().to_vec());

        for result in reader {
            match result {
                Ok(row) => ledger.rows.push(row),
                Err(e) => tracing::warn!("Skipping record: {}", e),
            }
        }

        Ok(ledger)
    }
}

impl Iterator for SyncReader {
    type Item = Result<TableRow, LedgerError>;

    /// Get the next ledger row
    ///
    /// # Returns
    ///
    /// * `Some(Ok(TableRow))` - Successfully read record
    /// * `Some(Err(LedgerError))` - Read error, with line number when known
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(convert_csv_record(&self.columns, self.record.iter()))),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
