//! Square debt matrix keyed by participant
//!
//! Rows are debtors and columns are creditors. The matrix is dense: every
//! ordered pair of participants in the selection has a cell, zero by default.

use super::error::LedgerError;
use super::ledger::Participant;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Dense participant × participant matrix of amounts
#[derive(Debug, Clone, PartialEq)]
pub struct DebtMatrix {
    participants: Vec<Participant>,
    index: HashMap<Participant, usize>,
    cells: Vec<Decimal>,
}

impl DebtMatrix {
    /// Create an all-zero matrix over `participants`
    ///
    /// Axis order follows the slice order.
    pub fn zeros(participants: &[Participant]) -> Self {
        let index = participants
            .iter()
            .enumerate()
            .map(|(position, participant)| (participant.clone(), position))
            .collect();

        DebtMatrix {
            participants: participants.to_vec(),
            index,
            cells: vec![Decimal::ZERO; participants.len() * participants.len()],
        }
    }

    /// Participants on both axes, in axis order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Number of participants on each axis
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the axis has no participants
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Axis position of `participant`
    pub fn position(&self, participant: &str) -> Option<usize> {
        self.index.get(participant).copied()
    }

    /// Amount `debtor` owes `creditor`, `None` for unknown participants
    pub fn get(&self, debtor: &str, creditor: &str) -> Option<Decimal> {
        let row = self.position(debtor)?;
        let column = self.position(creditor)?;
        Some(self.at(row, column))
    }

    /// Cell by axis positions
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    pub fn at(&self, row: usize, column: usize) -> Decimal {
        self.cells[row * self.len() + column]
    }

    /// Add `amount` to a cell by axis positions
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the cell would leave the `Decimal`
    /// range. The cell is left unchanged in that case.
    pub fn add_at(&mut self, row: usize, column: usize, amount: Decimal) -> Result<(), LedgerError> {
        let index = row * self.len() + column;
        self.cells[index] = self.cells[index].checked_add(amount).ok_or_else(|| {
            LedgerError::arithmetic_overflow(&format!(
                "debt of '{}' to '{}'",
                self.participants[row], self.participants[column]
            ))
        })?;
        Ok(())
    }

    /// Overwrite a cell by axis positions
    pub fn set_at(&mut self, row: usize, column: usize, amount: Decimal) {
        let width = self.len();
        self.cells[row * width + column] = amount;
    }

    /// One debtor's row as (creditor, amount) pairs in axis order
    pub fn row(&self, row: usize) -> impl Iterator<Item = (&Participant, Decimal)> + '_ {
        self.participants
            .iter()
            .enumerate()
            .map(move |(column, creditor)| (creditor, self.at(row, column)))
    }

    /// Sum of every cell
    pub fn total(&self) -> Result<Decimal, LedgerError> {
        self.cells.iter().try_fold(Decimal::ZERO, |sum, amount| {
            sum.checked_add(*amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("matrix total"))
        })
    }

    /// Add `other` cell-wise into this matrix
    ///
    /// Cells are matched by participant name; cells of participants unknown
    /// to `self` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if any cell would leave the `Decimal`
    /// range. Cells merged before the failing one keep their new value.
    pub fn merge(&mut self, other: &DebtMatrix) -> Result<(), LedgerError> {
        let same_axis = self.participants == other.participants;

        for (other_row, debtor) in other.participants.iter().enumerate() {
            let row = if same_axis { Some(other_row) } else { self.position(debtor) };
            let Some(row) = row else {
                continue;
            };
            for (other_column, creditor) in other.participants.iter().enumerate() {
                let column = if same_axis { Some(other_column) } else { self.position(creditor) };
                if let Some(column) = column {
                    self.add_at(row, column, other.at(other_row, other_column))?;
                }
            }
        }
        Ok(())
    }
}
