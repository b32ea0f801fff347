//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Accumulation is a map-reduce: rows are read in
//! batches, each batch is accumulated into its own partial matrix on a tokio
//! worker, and partials are merged into a shared `AsyncDebtStore`.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (per-batch validation + accumulation)
//!     └── AsyncDebtStore (DashMap-backed shared gross matrix)
//! ```
//!
//! # Ordering
//!
//! Gross accumulation is a sum, so batches may finish in any order. Row
//! summaries are put back in input order by batch index before the report is
//! written, which keeps the output identical to the sync strategy.

use crate::core::r#async::{
    ordered_summaries, AsyncDebtStore, BatchOutcome, BatchProcessor, LedgerBatch,
};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_report;
use crate::strategy::{ProcessingStrategy, RunConfig};
use crate::types::LedgerError;
use futures::stream::{FuturesUnordered, StreamExt};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};

/// Configuration for batch processing
///
/// Controls how rows are batched and how many batches may be accumulating
/// at the same time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of ledger rows per batch
    pub batch_size: usize,
    /// Maximum number of batches processing concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values are replaced by the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone, Default)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
    run: RunConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(config: BatchConfig, run: RunConfig) -> Self {
        Self { config, run }
    }

    async fn process_async(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let engine = Arc::new(self.run.engine());

        let file = tokio::fs::File::open(input_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => LedgerError::FileNotFound {
                    path: input_path.display().to_string(),
                },
                _ => LedgerError::IoError {
                    message: format!("Failed to open file '{}': {}", input_path.display(), e),
                },
            })?;

        // csv-async reads futures-io, tokio::fs::File implements tokio-io
        let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
        let mut reader = AsyncReader::new(compat_file).await?;

        let participants = engine.resolve_participants(reader.columns(), self.run.selection())?;
        let store = Arc::new(AsyncDebtStore::new(&participants));
        let processor = BatchProcessor::new(Arc::clone(&engine), Arc::clone(&store));

        let mut in_flight: FuturesUnordered<JoinHandle<Result<BatchOutcome, LedgerError>>> =
            FuturesUnordered::new();
        let mut outcomes = Vec::new();
        let mut index = 0;

        loop {
            let first_row = reader.rows_read() + 1;
            let rows = reader.read_batch(self.config.batch_size).await;
            if rows.is_empty() {
                break;
            }

            if in_flight.len() >= self.config.max_concurrent_batches {
                if let Some(joined) = in_flight.next().await {
                    outcomes.push(joined.map_err(batch_failed)??);
                }
            }

            in_flight.push(processor.spawn_batch(LedgerBatch {
                index,
                first_row,
                rows,
            }));
            index += 1;
        }

        while let Some(joined) = in_flight.next().await {
            outcomes.push(joined.map_err(batch_failed)??);
        }

        tracing::info!(
            batches = outcomes.len(),
            skipped = outcomes.iter().map(|outcome| outcome.skipped).sum::<usize>(),
            participants = participants.len(),
            "Computed debts"
        );

        let report = engine.finish(ordered_summaries(outcomes), store.snapshot());
        write_report(&report, self.run.report, self.run.debtor.as_deref(), output)
    }
}

fn batch_failed(e: JoinError) -> LedgerError {
    LedgerError::IoError {
        message: format!("Batch task failed: {}", e),
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process the ledger and write the configured report
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads the header and validates it against the schema
    /// 3. Reads batches and spawns their accumulation, keeping at most
    ///    `max_concurrent_batches` in flight
    /// 4. Nets the merged gross matrix
    /// 5. Writes the report using csv_format::write_report
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(self.process_async(input_path, output))
    }
}
