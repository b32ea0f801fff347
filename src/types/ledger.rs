//! Ledger-related types for the debt ledger engine
//!
//! This module defines the tabular ledger handed over by input collaborators,
//! the schema that locates its structural columns, and the validated
//! per-expense `LedgerRow` the engine works on.

use super::cell::CellValue;
use clap::ValueEnum;
use indexmap::IndexMap;

/// Participant identifier (one couple splitting expenses)
pub type Participant = String;

/// One raw ledger row, column name to trimmed cell text, in header order
///
/// Cells stay as text until a `LedgerRow` is projected from the row, so
/// free-text columns such as the label are never reformatted.
pub type TableRow = IndexMap<String, String>;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Names and layout of the structural ledger columns
///
/// Participant columns are every column after the first `reserved_columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSchema {
    /// Free-text description column (e.g. the restaurant)
    pub label_column: String,

    /// Full cost of the expense
    pub total_column: String,

    /// Legacy "how many couples share this" column
    ///
    /// Only read when the declared share basis is selected.
    pub count_column: String,

    /// Number of leading columns that are not participants
    pub reserved_columns: usize,
}

impl Default for LedgerSchema {
    fn default() -> Self {
        Self {
            label_column: "Restaurant".to_string(),
            total_column: "Total".to_string(),
            count_column: "Couples to include".to_string(),
            reserved_columns: 3,
        }
    }
}

/// How the per-participant share divisor is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShareBasis {
    /// Every participant with a numeric cell, payer included
    #[default]
    Present,

    /// Only participants with a strictly positive cell
    Beneficiaries,

    /// The value of the legacy count column
    Declared,
}

/// Tabular ledger as supplied by a loader
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    /// Header names in column order
    pub columns: Vec<String>,

    /// Data rows in input order
    pub rows: Vec<TableRow>,
}

impl Ledger {
    /// Create an empty ledger with the given header
    pub fn new(columns: Vec<String>) -> Self {
        Ledger {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row built from raw cells aligned with the header
    ///
    /// Missing trailing cells become blank; surplus cells are dropped.
    pub fn push_raw<'a, I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let row = table_row(&self.columns, cells);
        self.rows.push(row);
    }
}

/// Build a `TableRow` from a header and raw cell texts
pub fn table_row<'a, I>(columns: &[String], cells: I) -> TableRow
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cells = cells.into_iter();
    columns
        .iter()
        .map(|column| {
            let cell = cells.next().map(str::trim).unwrap_or_default();
            (column.clone(), cell.to_string())
        })
        .collect()
}

/// One expense event
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    /// Free-text description, passed through untouched
    pub label: String,

    /// Full cost of the event
    pub total: CellValue,

    /// Legacy participant count cell
    pub declared_count: CellValue,

    /// Participant cells in column order
    ///
    /// Negative marks the payer, positive a beneficiary, anything
    /// non-numeric means the participant sat this one out.
    pub contributions: IndexMap<Participant, CellValue>,
}

impl LedgerRow {
    /// Create a row with no contributions
    pub fn new(label: impl Into<String>, total: impl Into<CellValue>) -> Self {
        LedgerRow {
            label: label.into(),
            total: total.into(),
            declared_count: CellValue::Empty,
            contributions: IndexMap::new(),
        }
    }

    /// Builder-style helper setting one participant's cell
    pub fn with_contribution(
        mut self,
        participant: impl Into<Participant>,
        cell: impl Into<CellValue>,
    ) -> Self {
        self.contributions.insert(participant.into(), cell.into());
        self
    }

    /// Builder-style helper setting the legacy count cell
    pub fn with_declared_count(mut self, cell: impl Into<CellValue>) -> Self {
        self.declared_count = cell.into();
        self
    }

    /// The cell recorded for `participant`, `Empty` when there is none
    pub fn contribution(&self, participant: &str) -> &CellValue {
        self.contributions.get(participant).unwrap_or(&EMPTY_CELL)
    }

    /// Project a raw table row onto the schema and participant set
    ///
    /// The label is copied verbatim; every other cell is classified with
    /// `CellValue::parse`.
    pub fn from_table_row(row: &TableRow, schema: &LedgerSchema, participants: &[Participant]) -> Self {
        let cell = |column: &str| {
            row.get(column)
                .map(String::as_str)
                .map(CellValue::parse)
                .unwrap_or_default()
        };

        LedgerRow {
            label: row.get(&schema.label_column).cloned().unwrap_or_default(),
            total: cell(&schema.total_column),
            declared_count: cell(&schema.count_column),
            contributions: participants
                .iter()
                .map(|participant| (participant.clone(), cell(participant)))
                .collect(),
        }
    }
}
