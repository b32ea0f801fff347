use crate::strategy::{BatchConfig, RunConfig};
use crate::types::{LedgerSchema, Participant, ShareBasis};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Work out who owes whom from a shared expense ledger
#[derive(Parser, Debug)]
#[command(name = "debt-ledger")]
#[command(about = "Work out who owes whom from a shared expense ledger", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing the expense ledger
    #[arg(value_name = "INPUT", help = "Path to the input CSV ledger")]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for single-threaded or 'async' for parallel batches"
    )]
    pub strategy: StrategyType,

    /// Number of ledger rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of ledger rows per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent batches (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of batches accumulating concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Which table to write to stdout
    #[arg(long = "report", value_name = "REPORT", default_value = "net")]
    pub report: ReportKind,

    /// Restrict the debts report to one debtor
    #[arg(long = "debtor", value_name = "NAME")]
    pub debtor: Option<String>,

    /// Only split between these participants (repeatable)
    #[arg(long = "participant", value_name = "NAME")]
    pub participants: Vec<Participant>,

    /// How the share divisor is counted
    #[arg(long = "share-basis", value_name = "BASIS", default_value = "present")]
    pub share_basis: ShareBasis,

    /// Name of the label column
    #[arg(long = "label-column", value_name = "NAME", default_value = "Restaurant")]
    pub label_column: String,

    /// Name of the total column
    #[arg(long = "total-column", value_name = "NAME", default_value = "Total")]
    pub total_column: String,

    /// Name of the legacy participant count column
    #[arg(long = "count-column", value_name = "NAME", default_value = "Couples to include")]
    pub count_column: String,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Tables the CLI can print
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Netted matrix, positive means the row owes the column
    Net,
    /// Directional matrix before netting
    Gross,
    /// Payer and share of every row
    Shares,
    /// Positive net debts as debtor, creditor, amount
    Debts,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to defaults; zero values are replaced by
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create the RunConfig shared by every strategy
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            schema: LedgerSchema {
                label_column: self.label_column.clone(),
                total_column: self.total_column.clone(),
                count_column: self.count_column.clone(),
                ..LedgerSchema::default()
            },
            share_basis: self.share_basis,
            selection: (!self.participants.is_empty()).then(|| self.participants.clone()),
            report: self.report,
            debtor: self.debtor.clone(),
        }
    }
}
