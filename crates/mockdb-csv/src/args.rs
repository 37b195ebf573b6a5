//! CLI argument definitions for CSV output.

use clap::Args;

/// CSV-specific output arguments.
#[derive(Args, Clone, Debug, Default)]
pub struct CsvArgs {
    /// Write one CSV file per table under <output-dir>/<schema name>/
    #[arg(long = "csv", short = 'c', env = "MOCKDB_CSV")]
    pub enabled: bool,

    /// Omit the header row of the CSV files
    #[arg(long, env = "MOCKDB_NO_HEADER")]
    pub no_header: bool,
}
