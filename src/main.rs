//! Command-line interface for mockdb
//!
//! # Usage Examples
//!
//! ```bash
//! # Validate a schema document
//! mockdb -f shop.json
//!
//! # CSV files under out/shop/ and a PostgreSQL script out/shop.sql
//! mockdb -f shop.json --csv --sql -o out --seed 42
//!
//! # Oracle script, foreign keys cycling through the referenced values
//! mockdb -f shop.yaml --sql --dialect oracle --fk-sampling positional
//! ```
//!
//! Every option can also be set through a `MOCKDB_*` environment variable,
//! and log output is controlled with `RUST_LOG`.

use clap::Parser;
use mockdb::{run_generate, GenerateOpts};

#[derive(Parser)]
#[command(name = "mockdb")]
#[command(about = "Generate mock relational datasets as CSV files and SQL scripts")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    generate: GenerateOpts,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let report = run_generate(&cli.generate)?;

    for metrics in &report.csv {
        tracing::info!(
            "Generated {:?}: {} rows in {:?}",
            metrics.path,
            metrics.rows_written,
            metrics.total_duration
        );
    }
    if let Some(metrics) = &report.sql {
        tracing::info!(
            "Generated {:?}: {} statements in {:?}",
            metrics.path,
            metrics.statements,
            metrics.total_duration
        );
    }
    Ok(())
}
