//! CLI argument definitions for SQL output.

use crate::dialect::SqlDialect;
use clap::Args;

/// SQL-specific output arguments.
#[derive(Args, Clone, Debug, Default)]
pub struct SqlArgs {
    /// Write a SQL script to <output-dir>/<schema name>.sql
    #[arg(long = "sql", short = 's', env = "MOCKDB_SQL")]
    pub enabled: bool,

    /// SQL dialect of the script
    #[arg(long, value_enum, default_value_t = SqlDialect::Postgres, env = "MOCKDB_DIALECT")]
    pub dialect: SqlDialect,
}
