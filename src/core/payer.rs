//! Payer resolution
//!
//! The participant who fronted the money for an expense is marked by a
//! negative contribution cell. Exactly one such cell is expected per row; when
//! a row carries several, the earliest participant in column order wins.

use crate::types::{LedgerRow, Participant};

/// Finds the payer of a ledger row
#[derive(Debug, Clone, Copy, Default)]
pub struct PayerResolver;

impl PayerResolver {
    /// Create a new PayerResolver
    pub fn new() -> Self {
        PayerResolver
    }

    /// Resolve the payer among `participants`
    ///
    /// Iterates in the order of `participants` and returns the first one whose
    /// cell is numeric and strictly negative. Text and blank cells are skipped.
    ///
    /// # Returns
    ///
    /// * `Some(participant)` - the payer
    /// * `None` - nobody paid; the row contributes no debts
    pub fn resolve<'p>(
        &self,
        row: &LedgerRow,
        participants: &'p [Participant],
    ) -> Option<&'p Participant> {
        self.resolve_position(row, participants)
            .map(|position| &participants[position])
    }

    /// Same as [`resolve`](Self::resolve) but returns the position in `participants`
    pub fn resolve_position(&self, row: &LedgerRow, participants: &[Participant]) -> Option<usize> {
        participants
            .iter()
            .position(|participant| row.contribution(participant).is_negative())
    }
}
