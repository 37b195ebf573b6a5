//! SQL emitter for generated schemas.
//!
//! This crate writes a populated [`Schema`](mockdb_generator::Schema) as a
//! single script that drops, creates and fills every table:
//!
//! 1. `DROP TABLE` for every table
//! 2. `CREATE TABLE` with `NOT NULL` columns and the primary key
//! 3. `ALTER TABLE ... ADD CONSTRAINT` for every foreign key
//! 4. one `INSERT` per row
//!
//! PostgreSQL and Oracle are supported through the [`ToDdl`] trait.

pub mod args;
pub mod dialect;
mod error;
pub mod oracle;
pub mod postgres;
mod writer;

pub use args::SqlArgs;
pub use dialect::{quote, SqlDialect, ToDdl};
pub use error::SqlWriterError;
pub use oracle::OracleDdl;
pub use postgres::PostgresDdl;
pub use writer::{SqlMetrics, SqlWriter};
