//! Core debt accounting module
//!
//! This module contains the debt accounting components, leaves first:
//! - `payer` - Payer resolution from negative contribution cells
//! - `share` - Share divisor and per-participant share
//! - `accumulator` - Gross debt accumulation
//! - `netting` - Gross to net reduction
//! - `engine` - The `DebtLedgerEngine` facade with validation and queries
//! - `async` - Thread-safe map-reduce accumulation

pub mod accumulator;
pub mod r#async;
pub mod engine;
pub mod netting;
pub mod payer;
pub mod share;

pub use accumulator::DebtAccumulator;
pub use engine::DebtLedgerEngine;
pub use netting::NettingEngine;
pub use payer::PayerResolver;
pub use r#async::{AsyncDebtStore, BatchProcessor};
pub use share::ShareCalculator;
