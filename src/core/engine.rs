//! Debt ledger engine
//!
//! This module provides the `DebtLedgerEngine` facade. It validates the ledger
//! structure, turns raw table rows into `LedgerRow`s, and coordinates the
//! payer resolver, share calculator, accumulator and netting engine.
//!
//! The engine enforces:
//! - Structural validation (label and total columns present, participants
//!   non-empty and unique) before anything is computed
//! - Soft handling of malformed cells: logged, treated as absent, never fatal
//! - Exclusion of rows whose total is not a usable amount

use crate::core::accumulator::DebtAccumulator;
use crate::core::netting::NettingEngine;
use crate::types::{
    CellValue, DebtMatrix, DebtReport, Ledger, LedgerError, LedgerRow, LedgerSchema, Participant,
    RowSummary, ShareBasis, TableRow,
};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Debt accounting facade
///
/// Stateless apart from its configuration: every call recomputes from the
/// rows it is given, so the engine can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct DebtLedgerEngine {
    schema: LedgerSchema,
    accumulator: DebtAccumulator,
    netting: NettingEngine,
}

impl DebtLedgerEngine {
    /// Create an engine for `schema`, splitting totals by `basis`
    pub fn new(schema: LedgerSchema, basis: ShareBasis) -> Self {
        DebtLedgerEngine {
            schema,
            accumulator: DebtAccumulator::new(basis),
            netting: NettingEngine::new(),
        }
    }

    /// The ledger schema in use
    pub fn schema(&self) -> &LedgerSchema {
        &self.schema
    }

    /// The accumulator in use
    pub fn accumulator(&self) -> &DebtAccumulator {
        &self.accumulator
    }

    /// Validate a ledger header and return its participants
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The label or total column is absent
    /// - No column follows the reserved ones
    /// - A participant column name repeats
    /// - A participant column reuses a reserved column name
    pub fn participants(&self, columns: &[String]) -> Result<Vec<Participant>, LedgerError> {
        for required in [&self.schema.label_column, &self.schema.total_column] {
            if !columns.iter().any(|column| column == required) {
                return Err(LedgerError::missing_column(required));
            }
        }

        let reserved_count = self.schema.reserved_columns.min(columns.len());
        let (reserved, participants) = columns.split_at(reserved_count);

        // rows are keyed by column name, a clash would shadow the reserved cell
        let mut reserved_names: HashSet<&str> = reserved.iter().map(String::as_str).collect();
        reserved_names.extend([
            self.schema.label_column.as_str(),
            self.schema.total_column.as_str(),
            self.schema.count_column.as_str(),
        ]);

        let mut seen = HashSet::new();
        for participant in participants {
            if reserved_names.contains(participant.as_str()) {
                return Err(LedgerError::reserved_column_name(participant));
            }
            if !seen.insert(participant.as_str()) {
                return Err(LedgerError::duplicate_participant(participant));
            }
        }
        let participants = participants.to_vec();

        if participants.is_empty() {
            return Err(LedgerError::NoParticipants);
        }

        Ok(participants)
    }

    /// Narrow `participants` to a caller selection
    ///
    /// The result keeps ledger column order. `None` selects everybody.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected name is not a participant, or if the
    /// selection is empty.
    pub fn select(
        &self,
        participants: &[Participant],
        selection: Option<&[Participant]>,
    ) -> Result<Vec<Participant>, LedgerError> {
        let Some(selection) = selection else {
            return Ok(participants.to_vec());
        };

        if let Some(unknown) = selection.iter().find(|name| !participants.contains(name)) {
            return Err(LedgerError::unknown_participant(unknown));
        }

        let selected: Vec<Participant> = participants
            .iter()
            .filter(|participant| selection.contains(participant))
            .cloned()
            .collect();

        if selected.is_empty() {
            return Err(LedgerError::NoParticipants);
        }

        Ok(selected)
    }

    /// Validate header and selection in one step
    pub fn resolve_participants(
        &self,
        columns: &[String],
        selection: Option<&[Participant]>,
    ) -> Result<Vec<Participant>, LedgerError> {
        let participants = self.participants(columns)?;
        self.select(&participants, selection)
    }

    /// Turn raw table rows into validated ledger rows
    ///
    /// `first_row` is the 1-based data row number of `rows[0]`, used in log
    /// messages. Rows without a usable total are dropped.
    pub fn prepare_rows(
        &self,
        rows: &[TableRow],
        participants: &[Participant],
        first_row: usize,
    ) -> Vec<LedgerRow> {
        rows.iter()
            .enumerate()
            .map(|(offset, table_row)| {
                let row = LedgerRow::from_table_row(table_row, &self.schema, participants);
                (first_row + offset, row)
            })
            .filter(|(row_number, row)| self.validate_row(row, *row_number))
            .map(|(_, row)| row)
            .collect()
    }

    /// Check a single row, logging every cell problem found
    ///
    /// # Returns
    ///
    /// `true` if the row should take part in the computation
    pub fn validate_row(&self, row: &LedgerRow, row_number: usize) -> bool {
        for (participant, cell) in &row.contributions {
            if let CellValue::Text(value) = cell {
                let error = LedgerError::cell_parse(row_number, participant, value);
                tracing::warn!(row = row_number, "{}; treating as absent", error);
            }
        }

        match &row.total {
            CellValue::Number(total) if *total >= Decimal::ZERO => true,
            CellValue::Number(total) => {
                tracing::warn!(row = row_number, %total, label = %row.label, "Skipping row with negative total");
                false
            }
            other => {
                let error =
                    LedgerError::cell_parse(row_number, &self.schema.total_column, &other.to_string());
                tracing::warn!(row = row_number, label = %row.label, "{}; skipping row", error);
                false
            }
        }
    }

    /// Compute gross and net matrices for validated rows
    ///
    /// # Errors
    ///
    /// Returns `NoParticipants` if `participants` is empty, or
    /// `ArithmeticOverflow` if a debt sum leaves the `Decimal` range.
    pub fn compute(
        &self,
        rows: &[LedgerRow],
        participants: &[Participant],
    ) -> Result<DebtReport, LedgerError> {
        if participants.is_empty() {
            return Err(LedgerError::NoParticipants);
        }

        let (gross, summaries) = self.accumulator.accumulate_with_summaries(rows, participants)?;
        Ok(self.finish(summaries, gross))
    }

    /// Validate and compute a whole tabular ledger
    pub fn compute_ledger(
        &self,
        ledger: &Ledger,
        selection: Option<&[Participant]>,
    ) -> Result<DebtReport, LedgerError> {
        let participants = self.resolve_participants(&ledger.columns, selection)?;
        let rows = self.prepare_rows(&ledger.rows, &participants, 1);
        tracing::debug!(
            rows = rows.len(),
            skipped = ledger.rows.len() - rows.len(),
            participants = participants.len(),
            "Computing debts"
        );
        self.compute(&rows, &participants)
    }

    /// Build a report from an already accumulated gross matrix
    pub fn finish(&self, rows: Vec<RowSummary>, gross: DebtMatrix) -> DebtReport {
        let net = self.netting.net(&gross);
        DebtReport { rows, gross, net }
    }

    /// Amounts `participant` owes, by creditor
    ///
    /// Only strictly positive cells of the participant's net row are kept,
    /// in axis order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParticipant` if `participant` is not on the matrix axis.
    pub fn debts_of(
        net: &DebtMatrix,
        participant: &str,
    ) -> Result<IndexMap<Participant, Decimal>, LedgerError> {
        let row = net
            .position(participant)
            .ok_or_else(|| LedgerError::unknown_participant(participant))?;

        Ok(net
            .row(row)
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .map(|(creditor, amount)| (creditor.clone(), amount))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn columns(participants: &[&str]) -> Vec<String> {
        ["Restaurant", "Total", "Couples to include"]
            .iter()
            .chain(participants)
            .map(|s| s.to_string())
            .collect()
    }

    fn ledger(participants: &[&str], rows: &[&[&str]]) -> Ledger {
        let mut ledger = Ledger::new(columns(participants));
        for row in rows {
            ledger.push_raw(row.iter().copied());
        }
        ledger
    }

    fn names(list: &[&str]) -> Vec<Participant> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scenario_single_payer() {
        let ledger = ledger(&["X", "Y"], &[&["Lunch", "100", "2", "-50", "50"]]);

        let report = DebtLedgerEngine::default().compute_ledger(&ledger, None).unwrap();

        assert_eq!(report.rows[0].share_per_participant, dec!(50));
        assert_eq!(report.gross.get("Y", "X"), Some(dec!(50)));
        assert_eq!(report.net.get("Y", "X"), Some(dec!(50)));
        assert_eq!(report.net.get("X", "Y"), Some(dec!(-50)));
    }

    #[test]
    fn test_scenario_no_payer() {
        let ledger = ledger(&["X", "Y", "Z"], &[&["Brunch", "90", "3", "1", "1", "1"]]);

        let report = DebtLedgerEngine::default().compute_ledger(&ledger, None).unwrap();

        assert_eq!(report.rows[0].payer, None);
        assert_eq!(report.gross.total(), Ok(Decimal::ZERO));
        assert_eq!(report.net.total(), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_scenario_alternating_payers_net_out() {
        let ledger = ledger(
            &["X", "Y"],
            &[
                &["Lunch", "100", "2", "-1", "1"],
                &["Dinner", "100", "2", "1", "-1"],
            ],
        );

        let report = DebtLedgerEngine::default().compute_ledger(&ledger, None).unwrap();

        assert_eq!(report.gross.get("Y", "X"), Some(dec!(50)));
        assert_eq!(report.gross.get("X", "Y"), Some(dec!(50)));
        assert_eq!(report.net.get("X", "Y"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_scenario_debts_of_keeps_positive_entries() {
        let mut net = DebtMatrix::zeros(&names(&["X", "Y", "Z"]));
        net.set_at(0, 1, dec!(30));
        net.set_at(1, 0, dec!(-30));
        net.set_at(0, 2, dec!(-10));
        net.set_at(2, 0, dec!(10));

        let debts = DebtLedgerEngine::debts_of(&net, "X").unwrap();

        assert_eq!(debts.len(), 1);
        assert_eq!(debts.get("Y"), Some(&dec!(30)));
        assert!(!debts.contains_key("Z"));
    }

    #[test]
    fn test_debts_of_unknown_participant() {
        let net = DebtMatrix::zeros(&names(&["X"]));

        let result = DebtLedgerEngine::debts_of(&net, "Q");

        assert_eq!(result, Err(LedgerError::unknown_participant("Q")));
    }

    #[test]
    fn test_debts_of_is_idempotent() {
        let mut net = DebtMatrix::zeros(&names(&["X", "Y"]));
        net.set_at(1, 0, dec!(12));
        net.set_at(0, 1, dec!(-12));

        let first = DebtLedgerEngine::debts_of(&net, "Y").unwrap();
        let second = DebtLedgerEngine::debts_of(&net, "Y").unwrap();

        assert_eq!(first, second);
        assert!(DebtLedgerEngine::debts_of(&net, "X").unwrap().is_empty());
    }

    #[rstest]
    #[case::missing_label(
        vec!["Name", "Total", "Couples to include", "X"],
        LedgerError::missing_column("Restaurant")
    )]
    #[case::missing_total(
        vec!["Restaurant", "Amount", "Couples to include", "X"],
        LedgerError::missing_column("Total")
    )]
    #[case::no_participant_columns(
        vec!["Restaurant", "Total", "Couples to include"],
        LedgerError::NoParticipants
    )]
    #[case::duplicate_participant(
        vec!["Restaurant", "Total", "Couples to include", "X", "Y", "X"],
        LedgerError::duplicate_participant("X")
    )]
    #[case::participant_named_like_total(
        vec!["Restaurant", "Total", "Couples to include", "Total", "Y"],
        LedgerError::reserved_column_name("Total")
    )]
    #[case::participant_named_like_label(
        vec!["Restaurant", "Total", "Couples to include", "X", "Restaurant"],
        LedgerError::reserved_column_name("Restaurant")
    )]
    #[case::participant_named_like_count(
        vec!["Restaurant", "Total", "Count", "X", "Couples to include"],
        LedgerError::reserved_column_name("Couples to include")
    )]
    #[case::participant_named_like_unnamed_reserved(
        vec!["Restaurant", "Total", "Notes", "Notes", "Y"],
        LedgerError::reserved_column_name("Notes")
    )]
    fn test_participants_validation(#[case] header: Vec<&str>, #[case] expected: LedgerError) {
        let header: Vec<String> = header.into_iter().map(String::from).collect();

        let result = DebtLedgerEngine::default().participants(&header);

        assert_eq!(result, Err(expected));
    }

    #[test]
    fn test_participants_follow_reserved_columns() {
        let engine = DebtLedgerEngine::default();

        let participants = engine.participants(&columns(&["Smiths", "Joneses"])).unwrap();

        assert_eq!(participants, names(&["Smiths", "Joneses"]));
    }

    #[test]
    fn test_custom_schema_columns() {
        let schema = LedgerSchema {
            label_column: "Where".to_string(),
            total_column: "Cost".to_string(),
            count_column: "Count".to_string(),
            reserved_columns: 2,
        };
        let engine = DebtLedgerEngine::new(schema, ShareBasis::Present);
        let header: Vec<String> = ["Where", "Cost", "A", "B"].iter().map(|s| s.to_string()).collect();

        assert_eq!(engine.participants(&header).unwrap(), names(&["A", "B"]));
    }

    #[rstest]
    #[case::everyone(None, Ok(vec!["X", "Y", "Z"]))]
    #[case::subset_keeps_column_order(Some(vec!["Z", "X"]), Ok(vec!["X", "Z"]))]
    #[case::unknown(Some(vec!["X", "Q"]), Err(LedgerError::unknown_participant("Q")))]
    #[case::empty(Some(vec![]), Err(LedgerError::NoParticipants))]
    fn test_select(
        #[case] selection: Option<Vec<&str>>,
        #[case] expected: Result<Vec<&str>, LedgerError>,
    ) {
        let selection = selection.map(|list| names(&list));
        let expected = expected.map(|list| names(&list));

        let result = DebtLedgerEngine::default().select(&names(&["X", "Y", "Z"]), selection.as_deref());

        assert_eq!(result, expected);
    }

    #[test]
    fn test_selection_drops_unselected_payer() {
        let ledger = ledger(
            &["X", "Y", "Z"],
            &[
                &["Lunch", "90", "3", "-1", "1", "1"],
                &["Dinner", "60", "2", "", "-1", "1"],
            ],
        );
        let selection = names(&["Y", "Z"]);

        let report = DebtLedgerEngine::default()
            .compute_ledger(&ledger, Some(&selection))
            .unwrap();

        assert_eq!(report.participants(), selection.as_slice());
        assert_eq!(report.rows[0].payer, None);
        assert_eq!(report.gross.get("Z", "Y"), Some(dec!(30)));
        assert_eq!(report.gross.total(), Ok(dec!(30)));
    }

    #[test]
    fn test_invalid_totals_are_skipped() {
        let ledger = ledger(
            &["X", "Y"],
            &[
                &["Lunch", "n/a", "2", "-1", "1"],
                &["Refund", "-20", "2", "-1", "1"],
                &["Blank", "", "2", "-1", "1"],
                &["Dinner", "40", "2", "-1", "1"],
            ],
        );

        let report = DebtLedgerEngine::default().compute_ledger(&ledger, None).unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].label, "Dinner");
        assert_eq!(report.gross.get("Y", "X"), Some(dec!(20)));
    }

    #[test]
    fn test_text_contribution_is_absent_not_fatal() {
        let ledger = ledger(&["X", "Y", "Z"], &[&["Lunch", "90", "3", "-1", "yes", "1"]]);

        let report = DebtLedgerEngine::default().compute_ledger(&ledger, None).unwrap();

        assert_eq!(report.rows[0].participant_count, 2);
        assert_eq!(report.gross.get("Z", "X"), Some(dec!(45)));
        assert_eq!(report.gross.get("Y", "X"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_overflowing_totals_are_an_error_not_a_panic() {
        let max = "79228162514264337593543950335";
        let ledger = ledger(
            &["X", "Y"],
            &[
                &["Lunch", max, "2", "-1", "1"],
                &["Dinner", max, "2", "-1", "1"],
                &["Brunch", max, "2", "-1", "1"],
            ],
        );

        let result = DebtLedgerEngine::default().compute_ledger(&ledger, None);

        assert!(matches!(result, Err(LedgerError::ArithmeticOverflow { .. })));
    }

    #[test]
    fn test_compute_rejects_empty_participants() {
        let result = DebtLedgerEngine::default().compute(&[], &[]);

        assert_eq!(result, Err(LedgerError::NoParticipants));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let ledger = ledger(
            &["X", "Y", "Z"],
            &[
                &["Lunch", "90", "3", "-1", "1", "1"],
                &["Dinner", "75", "3", "1", "-1", "1"],
            ],
        );
        let engine = DebtLedgerEngine::default();

        let first = engine.compute_ledger(&ledger, None).unwrap();
        let second = engine.compute_ledger(&ledger, None).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_declared_basis_uses_count_column() {
        let ledger = ledger(&["X", "Y", "Z"], &[&["Lunch", "100", "4", "-1", "1", "1"]]);
        let engine = DebtLedgerEngine::new(LedgerSchema::default(), ShareBasis::Declared);

        let report = engine.compute_ledger(&ledger, None).unwrap();

        assert_eq!(report.rows[0].participant_count, 4);
        assert_eq!(report.gross.get("Y", "X"), Some(dec!(25)));
    }
}
