//! Debt Ledger CLI
//!
//! Command-line interface for settling shared expenses from CSV ledgers.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ledger.csv > net.csv
//! cargo run -- --report debts --debtor Smiths ledger.csv
//! cargo run -- --report shares --share-basis beneficiaries ledger.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 ledger.csv > net.csv
//! ```
//!
//! The report goes to stdout. Diagnostics go to stderr through `tracing`;
//! set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see more than warnings.
//!
//! # Processing Strategies
//!
//! - **sync**: Streaming CSV parsing with single-threaded accumulation (default)
//! - **async**: Batched accumulation on a multi-threaded runtime
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, invalid ledger header, etc.)

use debt_ledger_engine::cli;
use debt_ledger_engine::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config, args.to_run_config())
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}
