//! CSV format handling for ledgers and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - Header normalization
//! - Conversion from raw CSV records to `TableRow`s
//! - Report serialization (matrices, row shares, per-participant debts)
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::cli::ReportKind;
use crate::core::DebtLedgerEngine;
use crate::types::{CellValue, DebtMatrix, DebtReport, LedgerError, RowSummary, TableRow};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One line of the shares report
#[derive(Debug, Serialize, PartialEq)]
struct ShareRecord<'a> {
    label: &'a str,
    total: String,
    participant_count: usize,
    payer: &'a str,
    share_per_participant: String,
}

/// One line of the debts report
#[derive(Debug, Serialize, PartialEq)]
struct DebtRecord<'a> {
    debtor: &'a str,
    creditor: &'a str,
    amount: String,
}

/// Normalize header cells into column names
pub fn header_columns<'a, I>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    cells.into_iter().map(|cell| cell.trim().to_string()).collect()
}

/// Convert one raw CSV record into a `TableRow`
///
/// Cells are matched to `columns` by position and trimmed. Short records are
/// padded with blank cells.
pub fn convert_csv_record<'a, I>(columns: &[String], cells: I) -> TableRow
where
    I: IntoIterator<Item = &'a str>,
{
    crate::types::table_row(columns, cells)
}

/// Format an amount with two decimals
///
/// Amounts that round to zero are printed unsigned.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_zero() {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

fn format_total(total: &CellValue) -> String {
    match total.as_number() {
        Some(amount) => format_amount(amount),
        None => String::new(),
    }
}

/// Write a debt matrix
///
/// Header is `participant` followed by every creditor; one line per debtor.
pub fn write_matrix_csv(matrix: &DebtMatrix, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    let header = std::iter::once("participant")
        .chain(matrix.participants().iter().map(String::as_str));
    writer.write_record(header)?;

    for (row, debtor) in matrix.participants().iter().enumerate() {
        let mut record = Vec::with_capacity(matrix.len() + 1);
        record.push(debtor.clone());
        record.extend(matrix.row(row).map(|(_, amount)| format_amount(amount)));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the per-row payer and share table
pub fn write_shares_csv(rows: &[RowSummary], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record([
        "label",
        "total",
        "participant_count",
        "payer",
        "share_per_participant",
    ])?;

    for row in rows {
        writer.serialize(ShareRecord {
            label: &row.label,
            total: format_total(&row.total),
            participant_count: row.participant_count,
            payer: row.payer.as_deref().unwrap_or(""),
            share_per_participant: format_amount(row.share_per_participant),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write who owes whom after netting
///
/// Every debtor is listed in axis order unless `debtor` narrows it to one.
///
/// # Errors
///
/// Returns `UnknownParticipant` if `debtor` is not on the matrix axis.
pub fn write_debts_csv(
    net: &DebtMatrix,
    debtor: Option<&str>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let debtors: Vec<&str> = match debtor {
        Some(name) => vec![name],
        None => net.participants().iter().map(String::as_str).collect(),
    };

    // resolve before writing anything so an unknown name leaves output untouched
    let mut debts = Vec::with_capacity(debtors.len());
    for name in debtors {
        debts.push((name, DebtLedgerEngine::debts_of(net, name)?));
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    writer.write_record(["debtor", "creditor", "amount"])?;

    for (name, owed) in &debts {
        for (creditor, amount) in owed {
            writer.serialize(DebtRecord {
                debtor: name,
                creditor,
                amount: format_amount(*amount),
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write the requested view of a report
pub fn write_report(
    report: &DebtReport,
    kind: ReportKind,
    debtor: Option<&str>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match kind {
        ReportKind::Net => write_matrix_csv(&report.net, output),
        ReportKind::Gross => write_matrix_csv(&report.gross, output),
        ReportKind::Shares => write_shares_csv(&report.rows, output),
        ReportKind::Debts => write_debts_csv(&report.net, debtor, output),
    }
}
