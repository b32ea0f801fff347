//! Gross debt accumulation
//!
//! Every beneficiary of a paid row owes the payer one share. Rows are summed
//! independently, so any partition of the rows accumulated separately and
//! merged gives the same matrix.

use crate::core::payer::PayerResolver;
use crate::core::share::ShareCalculator;
use crate::types::{DebtMatrix, LedgerError, LedgerRow, Participant, RowSummary, ShareBasis};

/// Builds the gross (directional) debt matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct DebtAccumulator {
    resolver: PayerResolver,
    shares: ShareCalculator,
}

impl DebtAccumulator {
    /// Create an accumulator splitting totals by `basis`
    pub fn new(basis: ShareBasis) -> Self {
        DebtAccumulator {
            resolver: PayerResolver::new(),
            shares: ShareCalculator::new(basis),
        }
    }

    /// Accumulate `rows` into a fresh gross matrix over `participants`
    pub fn accumulate(
        &self,
        rows: &[LedgerRow],
        participants: &[Participant],
    ) -> Result<DebtMatrix, LedgerError> {
        Ok(self.accumulate_with_summaries(rows, participants)?.0)
    }

    /// Accumulate `rows` and keep each row's payer/share summary
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a gross cell leaves the `Decimal` range.
    pub fn accumulate_with_summaries(
        &self,
        rows: &[LedgerRow],
        participants: &[Participant],
    ) -> Result<(DebtMatrix, Vec<RowSummary>), LedgerError> {
        let mut gross = DebtMatrix::zeros(participants);
        let summaries = rows
            .iter()
            .map(|row| self.accumulate_row(row, &mut gross))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((gross, summaries))
    }

    /// Add a single row into `gross`
    ///
    /// Only participants on the matrix axis are considered. Debtors are the
    /// participants with a strictly positive cell; the payer's own cell is
    /// negative and never lands on the diagonal.
    pub fn accumulate_row(
        &self,
        row: &LedgerRow,
        gross: &mut DebtMatrix,
    ) -> Result<RowSummary, LedgerError> {
        let participants = gross.participants().to_vec();
        let (participant_count, share) = self.shares.share(row, &participants);
        let payer = self.resolver.resolve_position(row, &participants);

        if let Some(creditor) = payer {
            for (debtor, participant) in participants.iter().enumerate() {
                if debtor != creditor && row.contribution(participant).is_positive() {
                    gross.add_at(debtor, creditor, share)?;
                }
            }
        }

        Ok(RowSummary {
            label: row.label.clone(),
            total: row.total.clone(),
            participant_count,
            payer: payer.map(|position| participants[position].clone()),
            share_per_participant: share,
        })
    }
}
