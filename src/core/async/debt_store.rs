//! Thread-safe gross debt store for parallel accumulation
//!
//! This module provides the `AsyncDebtStore`, the reduce side of the parallel
//! accumulation: workers accumulate their batch into a private `DebtMatrix`
//! and merge it here.
//!
//! # Design
//!
//! Cells live in a `DashMap` keyed by (debtor, creditor) axis positions.
//! Merges touching different cells proceed in parallel; merges touching the
//! same cell are serialized by DashMap's shard locks. Because addition is
//! commutative, the merge order never changes the final matrix.

use crate::types::{DebtMatrix, LedgerError, Participant};
use dashmap::DashMap;
use rust_decimal::Decimal;

/// Concurrent gross debt matrix
#[derive(Debug)]
pub struct AsyncDebtStore {
    /// Matrix axis, fixed for the store's lifetime
    participants: Vec<Participant>,

    /// Non-zero cells by (debtor, creditor) position
    cells: DashMap<(usize, usize), Decimal>,
}

impl AsyncDebtStore {
    /// Create an empty store over `participants`
    pub fn new(participants: &[Participant]) -> Self {
        Self {
            participants: participants.to_vec(),
            cells: DashMap::new(),
        }
    }

    /// Matrix axis
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Add `amount` to one cell
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the cell would leave the `Decimal`
    /// range. The cell is left unchanged in that case.
    pub fn add(&self, debtor: usize, creditor: usize, amount: Decimal) -> Result<(), LedgerError> {
        let mut cell = self
            .cells
            .entry((debtor, creditor))
            .or_insert(Decimal::ZERO);

        *cell = cell.checked_add(amount).ok_or_else(|| {
            LedgerError::arithmetic_overflow(&format!(
                "debt of '{}' to '{}'",
                self.participants[debtor], self.participants[creditor]
            ))
        })?;
        Ok(())
    }

    /// Merge a partial matrix accumulated over the same axis
    ///
    /// Zero cells are skipped.
    pub fn merge(&self, partial: &DebtMatrix) -> Result<(), LedgerError> {
        for debtor in 0..partial.len() {
            for creditor in 0..partial.len() {
                let amount = partial.at(debtor, creditor);
                if !amount.is_zero() {
                    self.add(debtor, creditor, amount)?;
                }
            }
        }
        Ok(())
    }

    /// Copy the current state into a dense matrix
    ///
    /// The result is a snapshot; merges that happen afterwards are not
    /// reflected in it.
    pub fn snapshot(&self) -> DebtMatrix {
        let mut matrix = DebtMatrix::zeros(&self.participants);
        for entry in self.cells.iter() {
            let (debtor, creditor) = *entry.key();
            matrix.set_at(debtor, creditor, *entry.value());
        }
        matrix
    }
}
