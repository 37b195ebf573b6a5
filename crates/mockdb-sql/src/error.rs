//! Error types for the SQL writer.

use thiserror::Error;

/// Errors that can occur while writing a SQL script.
#[derive(Error, Debug)]
pub enum SqlWriterError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema is not ready to be written.
    #[error("Schema error")]
    Schema(#[from] mockdb_core::Error),
}
