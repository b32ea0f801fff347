//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It streams
//! ledger rows from the `SyncReader` and accumulates each one as it arrives,
//! so memory stays O(participants² + rows kept for the shares report) and the
//! raw table is never held in full.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Validation and accumulation to `DebtLedgerEngine`
//! - CSV output to `csv_format::write_report`

use crate::io::csv_format::write_report;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, RunConfig};
use crate::types::{DebtMatrix, LedgerError, LedgerRow};
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use debt_ledger_engine::strategy::{ProcessingStrategy, RunConfig, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(RunConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("ledger.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyncProcessingStrategy {
    run: RunConfig,
}

impl SyncProcessingStrategy {
    /// Create a new SyncProcessingStrategy
    pub fn new(run: RunConfig) -> Self {
        Self { run }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process the ledger and write the configured report
    ///
    /// 1. Opens a SyncReader and validates the header against the schema
    /// 2. Converts, validates and accumulates every row as it is read
    /// 3. Nets the gross matrix
    /// 4. Writes the report using csv_format::write_report
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let engine = self.run.engine();

        let reader = SyncReader::new(input_path)?;
        let participants = engine.resolve_participants(reader.columns(), self.run.selection())?;

        let mut gross = DebtMatrix::zeros(&participants);
        let mut summaries = Vec::new();
        let mut skipped = 0usize;

        for (offset, result) in reader.enumerate() {
            let row_number = offset + 1;
            match result {
                Ok(table_row) => {
                    let row = LedgerRow::from_table_row(&table_row, engine.schema(), &participants);
                    if engine.validate_row(&row, row_number) {
                        summaries.push(engine.accumulator().accumulate_row(&row, &mut gross)?);
                    } else {
                        skipped += 1;
                    }
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(row = row_number, "Skipping record: {}", e);
                }
            }
        }

        tracing::info!(
            rows = summaries.len(),
            skipped,
            participants = participants.len(),
            "Computed debts"
        );

        let report = engine.finish(summaries, gross);
        write_report(&report, self.run.report, self.run.debtor.as_deref(), output)
    }
}
