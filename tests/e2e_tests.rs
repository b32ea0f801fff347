//! End-to-end integration tests
//!
//! These tests validate the complete ledger pipeline using predefined CSV
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Computes the requested report with the selected strategy
//! 3. Compares the output with `<report>.csv` from the same directory
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - A single payer and beneficiary
//! - Rows without a payer
//! - Payers alternating until everything nets out
//! - A realistic multi-couple ledger with every report
//! - Malformed cells, unusable totals and short rows
//! - Repeating fractions and two-decimal rounding
//!
//! Each test is run twice: once with the synchronous strategy and once with
//! the async strategy.

#[cfg(test)]
mod tests {
    use debt_ledger_engine::cli::{ReportKind, StrategyType};
    use debt_ledger_engine::strategy::{create_strategy, BatchConfig, RunConfig};
    use debt_ledger_engine::types::LedgerError;
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    fn report_file(report: ReportKind) -> &'static str {
        match report {
            ReportKind::Net => "net.csv",
            ReportKind::Gross => "gross.csv",
            ReportKind::Shares => "shares.csv",
            ReportKind::Debts => "debts.csv",
        }
    }

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(
        input: &Path,
        strategy_type: StrategyType,
        run: RunConfig,
    ) -> Result<String, LedgerError> {
        // tiny batches so the async strategy really spreads rows over tasks
        let config = matches!(strategy_type, StrategyType::Async).then(|| BatchConfig::new(2, 2));
        let strategy = create_strategy(strategy_type, config, run);

        let mut output = Vec::new();
        strategy.process(input, &mut output)?;
        Ok(String::from_utf8(output).expect("Output is not UTF-8"))
    }

    /// Run a fixture and compare the report with the expected file
    ///
    /// # Panics
    ///
    /// Panics if fixture files cannot be read, processing fails, or the
    /// output differs from the expected file.
    fn run_test_fixture(fixture_name: &str, report: ReportKind, strategy_type: StrategyType) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/{}", fixture_dir, report_file(report));

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        let run_config = RunConfig {
            report,
            ..RunConfig::default()
        };
        let actual_output = run(Path::new(&input_path), strategy_type.clone(), run_config)
            .unwrap_or_else(|e| panic!("Failed to process ledger: {}", e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (report: {:?}, strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, report, strategy_type, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures with both strategies
    #[rstest]
    #[case("single_payer", ReportKind::Net)]
    #[case("single_payer", ReportKind::Gross)]
    #[case("no_payer", ReportKind::Net)]
    #[case("no_payer", ReportKind::Shares)]
    #[case("alternating_payers", ReportKind::Gross)]
    #[case("alternating_payers", ReportKind::Net)]
    #[case("alternating_payers", ReportKind::Debts)]
    #[case("group_dinners", ReportKind::Net)]
    #[case("group_dinners", ReportKind::Gross)]
    #[case("group_dinners", ReportKind::Shares)]
    #[case("group_dinners", ReportKind::Debts)]
    #[case("messy_cells", ReportKind::Net)]
    #[case("messy_cells", ReportKind::Shares)]
    #[case("thirds_precision", ReportKind::Net)]
    #[case("thirds_precision", ReportKind::Shares)]
    fn test_fixtures(
        #[case] fixture: &str,
        #[case] report: ReportKind,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, report, strategy);
    }

    #[rstest]
    fn test_participant_selection(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let run_config = RunConfig {
            selection: Some(vec!["Lees".to_string(), "Smiths".to_string()]),
            ..RunConfig::default()
        };

        let output = run(
            Path::new("tests/fixtures/group_dinners/input.csv"),
            strategy,
            run_config,
        )
        .unwrap();

        // axis keeps ledger column order, whatever order the selection used
        assert_eq!(
            output,
            "participant,Smiths,Lees\nSmiths,0.00,-75.00\nLees,75.00,0.00\n"
        );
    }

    #[rstest]
    fn test_debts_of_one_debtor(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let run_config = RunConfig {
            report: ReportKind::Debts,
            debtor: Some("Patels".to_string()),
            ..RunConfig::default()
        };

        let output = run(
            Path::new("tests/fixtures/group_dinners/input.csv"),
            strategy,
            run_config,
        )
        .unwrap();

        assert_eq!(
            output,
            "debtor,creditor,amount\nPatels,Smiths,44.75\nPatels,Lees,30.00\nPatels,Garcias,15.00\n"
        );
    }

    #[rstest]
    #[case::no_participants(
        "Restaurant,Total,Couples to include\nPizza,10,1\n",
        LedgerError::NoParticipants
    )]
    #[case::missing_label(
        "Place,Total,Couples to include,X\n",
        LedgerError::MissingColumn { column: "Restaurant".to_string() }
    )]
    #[case::duplicate_participant(
        "Restaurant,Total,Couples to include,X,Y,X\n",
        LedgerError::DuplicateParticipant { participant: "X".to_string() }
    )]
    #[case::participant_named_like_total(
        "Restaurant,Total,Couples to include,Total,Y\nPizza,100,2,-1,1\n",
        LedgerError::ReservedColumnName { participant: "Total".to_string() }
    )]
    #[case::empty_file("", LedgerError::MissingColumn { column: "Restaurant".to_string() })]
    fn test_invalid_ledger_fails(
        #[case] content: &str,
        #[case] expected: LedgerError,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let file = create_temp_csv(content);

        let result = run(file.path(), strategy, RunConfig::default());

        assert_eq!(result.unwrap_err(), expected);
    }

    #[rstest]
    fn test_unknown_selection_fails(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let run_config = RunConfig {
            selection: Some(vec!["Smiths".to_string(), "Joneses".to_string()]),
            ..RunConfig::default()
        };

        let result = run(
            Path::new("tests/fixtures/group_dinners/input.csv"),
            strategy,
            run_config,
        );

        assert_eq!(
            result.unwrap_err(),
            LedgerError::UnknownParticipant {
                participant: "Joneses".to_string()
            }
        );
    }

    #[rstest]
    fn test_missing_input_file_fails(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let result = run(
            Path::new("tests/fixtures/does_not_exist.csv"),
            strategy,
            RunConfig::default(),
        );

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }

    #[rstest]
    fn test_overflowing_totals_fail(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let max = "79228162514264337593543950335";
        let file = create_temp_csv(&format!(
            "Restaurant,Total,Couples to include,X,Y\n\
             Lunch,{max},2,-1,1\n\
             Dinner,{max},2,-1,1\n\
             Brunch,{max},2,-1,1\n"
        ));

        let result = run(file.path(), strategy, RunConfig::default());

        assert!(matches!(result, Err(LedgerError::ArithmeticOverflow { .. })));
    }

    #[rstest]
    fn test_labels_pass_through_unchanged(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let file = create_temp_csv(
            "Restaurant,Total,Couples to include,X,Y\n\
             007,10,2,-1,1\n\
             1e3,10,2,-1,1\n",
        );
        let run_config = RunConfig {
            report: ReportKind::Shares,
            ..RunConfig::default()
        };

        let output = run(file.path(), strategy, run_config).unwrap();

        assert_eq!(
            output,
            "label,total,participant_count,payer,share_per_participant\n\
             007,10.00,2,X,5.00\n\
             1e3,10.00,2,X,5.00\n"
        );
    }
}
