//! CSV emitter for generated schemas.
//!
//! This crate writes a populated [`Schema`](mockdb_generator::Schema) as one
//! CSV file per table, under `<output dir>/<schema name>/<table>.csv`.
//!
//! # Example
//!
//! ```no_run
//! use mockdb_csv::CsvWriter;
//! use mockdb_generator::{GenerateOptions, Schema};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let schema = Schema::from_file("shop.json", &GenerateOptions::default().with_seed(42))?;
//! let metrics = CsvWriter::new("out").write_schema(&schema, &mut StdRng::seed_from_u64(42))?;
//! println!("wrote {} files", metrics.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod args;
mod error;
mod value;
mod writer;

pub use args::CsvArgs;
pub use error::CsvWriterError;
pub use value::CsvValue;
pub use writer::{CsvWriter, WriteMetrics, DEFAULT_BUFFER_SIZE};
