//! Parallel batch accumulation
//!
//! This module provides the `BatchProcessor`, the map side of the parallel
//! accumulation. Each batch of raw rows is validated and accumulated into a
//! private partial matrix, which is then merged into the shared
//! `AsyncDebtStore`.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     ├── Arc<DebtLedgerEngine>  (validation + per-row accumulation)
//!     ├── Arc<AsyncDebtStore>    (shared gross matrix)
//!     └── participants           (matrix axis)
//! ```
//!
//! Batches are independent, so they may finish in any order. Each outcome
//! carries its batch index so callers can restore input order for the row
//! summaries.

use std::sync::Arc;

use super::AsyncDebtStore;
use crate::core::DebtLedgerEngine;
use crate::types::{LedgerError, Participant, RowSummary, TableRow};

/// A contiguous slice of the ledger
#[derive(Debug, Clone)]
pub struct LedgerBatch {
    /// Position of the batch in the input, starting at 0
    pub index: usize,

    /// 1-based data row number of `rows[0]`
    pub first_row: usize,

    /// Raw rows in input order
    pub rows: Vec<TableRow>,
}

/// What processing one batch produced
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Index of the processed batch
    pub index: usize,

    /// Summaries of the rows that passed validation, in input order
    pub summaries: Vec<RowSummary>,

    /// Rows dropped by validation
    pub skipped: usize,
}

/// Batch processor feeding a shared debt store
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: Arc<DebtLedgerEngine>,
    store: Arc<AsyncDebtStore>,
}

impl BatchProcessor {
    /// Create a processor accumulating into `store`
    ///
    /// The store's axis is the participant selection every batch is
    /// projected onto.
    pub fn new(engine: Arc<DebtLedgerEngine>, store: Arc<AsyncDebtStore>) -> Self {
        Self { engine, store }
    }

    /// Participants on the store axis
    pub fn participants(&self) -> &[Participant] {
        self.store.participants()
    }

    /// Validate, accumulate and merge one batch
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the batch or the merge leaves the
    /// `Decimal` range.
    pub fn process_batch(&self, batch: LedgerBatch) -> Result<BatchOutcome, LedgerError> {
        let participants = self.participants();
        let rows = self
            .engine
            .prepare_rows(&batch.rows, participants, batch.first_row);
        let skipped = batch.rows.len() - rows.len();

        let (partial, summaries) = self
            .engine
            .accumulator()
            .accumulate_with_summaries(&rows, participants)?;
        self.store.merge(&partial)?;

        tracing::debug!(
            batch = batch.index,
            rows = rows.len(),
            skipped,
            "Accumulated batch"
        );

        Ok(BatchOutcome {
            index: batch.index,
            summaries,
            skipped,
        })
    }

    /// Process a batch on the tokio runtime
    pub fn spawn_batch(
        &self,
        batch: LedgerBatch,
    ) -> tokio::task::JoinHandle<Result<BatchOutcome, LedgerError>> {
        let processor = self.clone();
        tokio::spawn(async move { processor.process_batch(batch) })
    }
}

/// Concatenate batch summaries back into input order
pub fn ordered_summaries(mut outcomes: Vec<BatchOutcome>) -> Vec<RowSummary> {
    outcomes.sort_by_key(|outcome| outcome.index);
    outcomes
        .into_iter()
        .flat_map(|outcome| outcome.summaries)
        .collect()
}
