//! Per-participant share computation
//!
//! A row's total is split evenly. The divisor depends on the configured
//! [`ShareBasis`]; by default every participant with a numeric cell counts,
//! the payer included, since the payer eats too.

use crate::types::{LedgerRow, Participant, ShareBasis};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Splits a row's total across its participants
#[derive(Debug, Clone, Copy, Default)]
pub struct ShareCalculator {
    basis: ShareBasis,
}

impl ShareCalculator {
    /// Create a calculator for the given share basis
    pub fn new(basis: ShareBasis) -> Self {
        ShareCalculator { basis }
    }

    /// The active share basis
    pub fn basis(&self) -> ShareBasis {
        self.basis
    }

    /// Count the share divisor of `row` among `participants`
    pub fn participant_count(&self, row: &LedgerRow, participants: &[Participant]) -> usize {
        match self.basis {
            ShareBasis::Present => participants
                .iter()
                .filter(|participant| row.contribution(participant).is_present())
                .count(),
            ShareBasis::Beneficiaries => participants
                .iter()
                .filter(|participant| row.contribution(participant).is_positive())
                .count(),
            ShareBasis::Declared => row
                .declared_count
                .as_number()
                .filter(|count| *count > Decimal::ZERO && count.fract().is_zero())
                .and_then(|count| count.to_usize())
                .unwrap_or(0),
        }
    }

    /// Compute `(participant_count, share_per_participant)` for a row
    ///
    /// Never fails: a non-numeric or negative total counts as zero and a zero
    /// divisor yields a zero share.
    pub fn share(&self, row: &LedgerRow, participants: &[Participant]) -> (usize, Decimal) {
        let count = self.participant_count(row, participants);
        let total = row
            .total
            .as_number()
            .filter(|total| *total >= Decimal::ZERO)
            .unwrap_or(Decimal::ZERO);

        let share = if count > 0 {
            total / Decimal::from(count)
        } else {
            Decimal::ZERO
        };

        (count, share)
    }
}
