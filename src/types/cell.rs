//! Ledger cell values
//!
//! Spreadsheet cells mix numbers, free text and blanks. `CellValue` tags each
//! cell so that payer and beneficiary status is always decided by an explicit
//! numeric coercion, never by whether a cell merely "looks" filled in.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A single ledger cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    /// A numeric amount
    Number(Decimal),

    /// Anything that is not blank but does not parse as a number
    Text(String),

    /// A blank cell
    #[default]
    Empty,
}

impl CellValue {
    /// Classify a raw cell
    ///
    /// Surrounding whitespace is ignored. Plain and scientific notation are
    /// both accepted as numbers.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(CellValue::Number)
            .unwrap_or_else(|_| CellValue::Text(trimmed.to_string()))
    }

    /// The numeric value, if this cell holds one
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(_) | CellValue::Empty => None,
        }
    }

    /// Whether the cell counts as filled in for share counting
    ///
    /// Text cells are treated as absent.
    pub fn is_present(&self) -> bool {
        self.as_number().is_some()
    }

    /// Whether the cell marks its participant as the payer
    pub fn is_negative(&self) -> bool {
        self.as_number().is_some_and(|value| value < Decimal::ZERO)
    }

    /// Whether the cell marks its participant as a beneficiary
    pub fn is_positive(&self) -> bool {
        self.as_number().is_some_and(|value| value > Decimal::ZERO)
    }

    /// Whether the cell holds non-numeric text
    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(raw: &str) -> Self {
        CellValue::parse(raw)
    }
}
