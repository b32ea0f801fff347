//! Parallel implementations of core components
//!
//! This module provides the thread-safe pieces of the map-reduce
//! accumulation used by the async strategy.
//!
//! # Architecture
//!
//! - **AsyncDebtStore**: Thread-safe gross matrix using DashMap
//! - **BatchProcessor**: Validates and accumulates one batch of rows into a
//!   private partial matrix, then merges it into the store
//!
//! # Thread Safety
//!
//! Batches never share mutable state except through the store, and the store
//! only ever adds. Any interleaving of batches yields the same gross matrix.

pub mod batch_processor;
pub mod debt_store;

pub use batch_processor::{ordered_summaries, BatchOutcome, BatchProcessor, LedgerBatch};
pub use debt_store::AsyncDebtStore;
