//! Processing strategy module for ledger computation
//!
//! This module defines the Strategy pattern for complete debt computation
//! pipelines, encompassing CSV parsing, accumulation and report output. This
//! allows different implementations (synchronous, asynchronous batch) to be
//! selected at runtime; both produce identical output for the same input.

use crate::cli::{ReportKind, StrategyType};
use crate::core::DebtLedgerEngine;
use crate::types::{LedgerError, LedgerSchema, Participant, ShareBasis};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Settings shared by every strategy
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Structural columns of the input ledger
    pub schema: LedgerSchema,

    /// How share divisors are counted
    pub share_basis: ShareBasis,

    /// Participants to split between; `None` means all of them
    pub selection: Option<Vec<Participant>>,

    /// Which table to write
    pub report: ReportKind,

    /// Debtor filter for the debts report
    pub debtor: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            schema: LedgerSchema::default(),
            share_basis: ShareBasis::default(),
            selection: None,
            report: ReportKind::Net,
            debtor: None,
        }
    }
}

impl RunConfig {
    /// Build the engine this configuration describes
    pub fn engine(&self) -> DebtLedgerEngine {
        DebtLedgerEngine::new(self.schema.clone(), self.share_basis)
    }

    /// Participant selection as a slice
    pub fn selection(&self) -> Option<&[Participant]> {
        self.selection.as_deref()
    }
}

/// Processing strategy trait for complete ledger pipelines
///
/// Each strategy reads a ledger from a CSV file, accumulates and nets the
/// debts, and writes the configured report to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process the ledger in `input_path` and write the report to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened or its header cannot be read
    /// - The header fails structural validation (missing columns, no or
    ///   duplicate participants, unknown selected participant)
    /// - The requested debtor is not a participant
    /// - Output cannot be written
    ///
    /// Malformed cells and unusable rows are logged and skipped; they never
    /// cause this method to fail.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
/// * `run` - Schema, share basis, selection and report settings
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    run: RunConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(run)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, run))
        }
    }
}
