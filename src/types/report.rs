//! Computation results handed to output consumers

use super::cell::CellValue;
use super::ledger::Participant;
use super::matrix::DebtMatrix;
use rust_decimal::Decimal;

/// Derived view of one expense row: who paid and what each share is
#[derive(Debug, Clone, PartialEq)]
pub struct RowSummary {
    /// Row label, passed through
    pub label: String,

    /// Row total as read
    pub total: CellValue,

    /// Share divisor under the active share basis
    pub participant_count: usize,

    /// Resolved payer, if any
    pub payer: Option<Participant>,

    /// `total / participant_count`, or zero when nobody is counted
    pub share_per_participant: Decimal,
}

/// Everything one computation produces
#[derive(Debug, Clone, PartialEq)]
pub struct DebtReport {
    /// Per-row summaries in input order (rows that passed validation)
    pub rows: Vec<RowSummary>,

    /// Directional, unnetted debts
    pub gross: DebtMatrix,

    /// Netted debts
    pub net: DebtMatrix,
}

impl DebtReport {
    /// Participants on both matrix axes
    pub fn participants(&self) -> &[Participant] {
        self.gross.participants()
    }
}
