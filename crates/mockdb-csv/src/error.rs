//! Error types for the CSV writer.

use thiserror::Error;

/// Errors that can occur while writing CSV files.
#[derive(Error, Debug)]
pub enum CsvWriterError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The schema is not ready to be written.
    #[error("Schema error")]
    Schema(#[from] mockdb_core::Error),
}
