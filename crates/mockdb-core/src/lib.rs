//! Core types for the mockdb synthetic dataset generator.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`DbType`] and [`GenerationMode`] - Column types, generation modes and
//!   their compatibility table
//! - [`GeneratedValue`] and [`Pattern`] - Generated values and generator parameters
//! - [`SchemaDocument`] - Declarative schema documents loaded from JSON or YAML
//! - [`Error`] - The error taxonomy shared by every crate
//!
//! # Architecture
//!
//! ```text
//! mockdb-core (this crate)
//!    │
//!    ├─── mockdb-generator  (value generators, schema model)
//!    │
//!    ├─── mockdb-csv        (CSV emitter)
//!    └─── mockdb-sql        (SQL emitter, Postgres and Oracle dialects)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mockdb_core::{DbType, GenerationMode};
//!
//! let db_type: DbType = "integer".parse().unwrap();
//! assert!(db_type.check_mode(GenerationMode::Repeating).is_ok());
//! assert!(DbType::Date.check_mode(GenerationMode::Repeating).is_err());
//! ```

pub mod document;
pub mod error;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use document::{AttributeDocument, Scalar, SchemaDocument, StepDocument, TableDocument};
pub use error::{Error, Result};
pub use types::{DbType, GenerationMode, ModeSet};
pub use values::{GeneratedValue, Pattern, DATE_FORMAT};
