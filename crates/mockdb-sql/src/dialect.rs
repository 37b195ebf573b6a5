//! SQL dialects and the statement builder trait they implement.

use crate::oracle::OracleDdl;
use crate::postgres::PostgresDdl;
use clap::ValueEnum;
use mockdb_core::{DbType, GeneratedValue};
use std::fmt;

/// Trait for generating the statements of a SQL script.
pub trait ToDdl {
    /// Column type for `db_type`; `length` applies to strings.
    fn type_name(&self, db_type: DbType, length: Option<usize>) -> String;

    /// Statement dropping `table` together with dependent constraints.
    fn drop_table(&self, table: &str) -> String;

    /// Suffix appended to every foreign-key constraint.
    fn foreign_key_actions(&self) -> &'static str {
        ""
    }

    /// Value literal as it appears in an INSERT statement.
    fn literal(&self, value: &GeneratedValue) -> String;

    /// Generate a complete CREATE TABLE statement.
    ///
    /// Every column is `NOT NULL`; a `pk_<table>` constraint is added when
    /// `primary_keys` is not empty.
    fn create_table(
        &self,
        table: &str,
        columns: &[(&str, DbType, Option<usize>)],
        primary_keys: &[&str],
    ) -> String {
        let mut defs: Vec<String> = columns
            .iter()
            .map(|(name, db_type, length)| {
                format!("\t{} {} NOT NULL", name, self.type_name(*db_type, *length))
            })
            .collect();
        if !primary_keys.is_empty() {
            defs.push(format!(
                "\tCONSTRAINT pk_{} PRIMARY KEY ({})",
                table,
                primary_keys.join(", ")
            ));
        }
        format!("CREATE TABLE {} (\n{}\n);", table, defs.join(",\n"))
    }

    /// Generate the ALTER TABLE statement adding a foreign-key constraint.
    fn foreign_key(&self, table: &str, column: &str, parent: &str, parent_column: &str) -> String {
        format!(
            "ALTER TABLE {table} ADD CONSTRAINT fk_{table}_{column} FOREIGN KEY ({column}) REFERENCES {parent}({parent_column}){};",
            self.foreign_key_actions()
        )
    }

    /// Generate an INSERT statement for one row.
    fn insert(&self, table: &str, columns: &[&str], values: &[&GeneratedValue]) -> String {
        let literals: Vec<String> = values.iter().map(|v| self.literal(v)).collect();
        format!(
            "INSERT INTO {}({}) VALUES ({});",
            table,
            columns.join(", "),
            literals.join(", ")
        )
    }
}

/// Quote `s` as a SQL string literal, doubling embedded quotes.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// SQL dialect of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SqlDialect {
    #[default]
    Postgres,
    Oracle,
}

impl SqlDialect {
    /// Statement builder for this dialect.
    pub fn ddl(self) -> &'static dyn ToDdl {
        match self {
            SqlDialect::Postgres => &PostgresDdl,
            SqlDialect::Oracle => &OracleDdl,
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::Postgres => f.write_str("postgres"),
            SqlDialect::Oracle => f.write_str("oracle"),
        }
    }
}
