//! PostgreSQL statement generation.

use crate::dialect::{quote, ToDdl};
use mockdb_core::{DbType, GeneratedValue};
use mockdb_generator::DEFAULT_STRING_LENGTH;

/// PostgreSQL DDL generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDdl;

impl ToDdl for PostgresDdl {
    fn type_name(&self, db_type: DbType, length: Option<usize>) -> String {
        match db_type {
            DbType::Integer => "INTEGER".to_string(),
            DbType::Real => "REAL".to_string(),
            DbType::String => format!("VARCHAR({})", length.unwrap_or(DEFAULT_STRING_LENGTH)),
            DbType::Date => "DATE".to_string(),
        }
    }

    fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {table} CASCADE;")
    }

    fn foreign_key_actions(&self) -> &'static str {
        " ON UPDATE NO ACTION ON DELETE NO ACTION"
    }

    fn literal(&self, value: &GeneratedValue) -> String {
        match value {
            GeneratedValue::Integer(i) => i.to_string(),
            GeneratedValue::Real(f) => f.to_string(),
            GeneratedValue::Date(_) => quote(&value.to_string()),
            GeneratedValue::String(s) => quote(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_type_names() {
        let ddl = PostgresDdl;
        assert_eq!(ddl.type_name(DbType::Integer, None), "INTEGER");
        assert_eq!(ddl.type_name(DbType::Real, None), "REAL");
        assert_eq!(ddl.type_name(DbType::String, Some(25)), "VARCHAR(25)");
        assert_eq!(ddl.type_name(DbType::Date, None), "DATE");
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(
            PostgresDdl.drop_table("users"),
            "DROP TABLE IF EXISTS users CASCADE;"
        );
    }

    #[test]
    fn test_create_table() {
        let ddl = PostgresDdl;
        let columns = vec![
            ("id", DbType::Integer, None),
            ("name", DbType::String, Some(100)),
            ("joined", DbType::Date, None),
        ];

        let sql = ddl.create_table("users", &columns, &[]);
        assert_eq!(
            sql,
            "CREATE TABLE users (\n\tid INTEGER NOT NULL,\n\tname VARCHAR(100) NOT NULL,\n\tjoined DATE NOT NULL\n);"
        );
    }

    #[test]
    fn test_create_table_with_pk() {
        let ddl = PostgresDdl;
        let columns = vec![("a", DbType::Integer, None), ("b", DbType::Real, None)];

        let sql = ddl.create_table("pairs", &columns, &["a", "b"]);
        assert!(sql.contains("\tb REAL NOT NULL,\n"));
        assert!(sql.ends_with("\tCONSTRAINT pk_pairs PRIMARY KEY (a, b)\n);"));
    }

    #[test]
    fn test_foreign_key() {
        assert_eq!(
            PostgresDdl.foreign_key("orders", "customer", "customers", "id"),
            "ALTER TABLE orders ADD CONSTRAINT fk_orders_customer FOREIGN KEY (customer) REFERENCES customers(id) ON UPDATE NO ACTION ON DELETE NO ACTION;"
        );
    }

    #[test]
    fn test_literals() {
        let ddl = PostgresDdl;
        assert_eq!(ddl.literal(&GeneratedValue::Integer(-7)), "-7");
        assert_eq!(ddl.literal(&GeneratedValue::Real(1.5)), "1.5");
        assert_eq!(ddl.literal(&"it's".into()), "'it''s'");

        let date = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(ddl.literal(&date.into()), "'2023-12-31 23:59:00'");
    }

    #[test]
    fn test_insert_statement() {
        let ddl = PostgresDdl;
        let id = GeneratedValue::Integer(1);
        let name = GeneratedValue::from("ann");
        assert_eq!(
            ddl.insert("users", &["id", "name"], &[&id, &name]),
            "INSERT INTO users(id, name) VALUES (1, 'ann');"
        );
    }
}
