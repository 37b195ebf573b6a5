//! Oracle statement generation.

use crate::dialect::{quote, ToDdl};
use chrono::Timelike;
use mockdb_core::{DbType, GeneratedValue};
use mockdb_generator::DEFAULT_STRING_LENGTH;

/// Oracle DDL generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDdl;

impl ToDdl for OracleDdl {
    fn type_name(&self, db_type: DbType, length: Option<usize>) -> String {
        match db_type {
            DbType::Integer | DbType::Real => "NUMBER".to_string(),
            DbType::String => format!("VARCHAR2({})", length.unwrap_or(DEFAULT_STRING_LENGTH)),
            DbType::Date => "TIMESTAMP".to_string(),
        }
    }

    fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {table} CASCADE CONSTRAINTS;")
    }

    fn literal(&self, value: &GeneratedValue) -> String {
        match value {
            GeneratedValue::Integer(i) => i.to_string(),
            GeneratedValue::Real(f) => f.to_string(),
            GeneratedValue::Date(date) => {
                // Fractional seconds are only printed when present
                let format = if date.nanosecond() == 0 {
                    "YYYY-MM-DD HH24:MI:SS"
                } else {
                    "YYYY-MM-DD HH24:MI:SS.FF"
                };
                format!("TO_TIMESTAMP({}, '{format}')", quote(&value.to_string()))
            }
            GeneratedValue::String(s) => quote(s),
        }
    }
}
