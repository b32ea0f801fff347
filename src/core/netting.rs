//! Netting of gross debts
//!
//! `net[a][b] = gross[a][b] - gross[b][a]`. The result is antisymmetric with a
//! zero diagonal; a positive cell means the row participant owes the column
//! participant.

use crate::types::DebtMatrix;
use rust_decimal::Decimal;

/// Reduces a gross matrix to one signed balance per ordered pair
#[derive(Debug, Clone, Copy, Default)]
pub struct NettingEngine;

impl NettingEngine {
    /// Create a new NettingEngine
    pub fn new() -> Self {
        NettingEngine
    }

    /// Net `gross` against its transpose
    pub fn net(&self, gross: &DebtMatrix) -> DebtMatrix {
        let mut net = DebtMatrix::zeros(gross.participants());

        for row in 0..gross.len() {
            for column in 0..gross.len() {
                let difference = gross.at(row, column) - gross.at(column, row);
                // normalize so fully netted pairs never carry a negative zero
                let amount = if difference.is_zero() {
                    Decimal::ZERO
                } else {
                    difference
                };
                net.set_at(row, column, amount);
            }
        }

        net
    }
}
