//! Value generators and schema model for the mockdb dataset generator.
//!
//! This crate turns a [`SchemaDocument`](mockdb_core::SchemaDocument) into a
//! populated [`Schema`]: tables of typed columns and foreign keys, each filled
//! with generated values. A seeded RNG makes every run reproducible.
//!
//! # Architecture
//!
//! ```text
//! SchemaDocument (JSON / YAML)
//!        │
//!        ▼
//! ┌──────────────────┐      resolve        ┌────────────────────┐
//! │      Schema      │ ──────────────────▶ │ foreign-key Binding│
//! │  Table ─ Attribute│                    └────────────────────┘
//! └────────┬─────────┘
//!          │ generate_data (GenerationContext: StdRng, WordLists)
//!          ▼
//!   ValueGenerator ──▶ Arc<[GeneratedValue]> per attribute
//!          │
//!          ▼
//!   AttributeView / Table::rows  (read by the emitters)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mockdb_core::{GeneratedValue, SchemaDocument};
//! use mockdb_generator::{GenerateOptions, Schema};
//!
//! let doc = SchemaDocument::from_json(r#"{"tables": [{
//!     "name": "t", "rows": 3,
//!     "attributes": [{"name": "id", "type": "INTEGER", "generation": "INCREASING"}]
//! }]}"#).unwrap();
//!
//! let schema = Schema::from_document("demo", &doc, &GenerateOptions::default().with_seed(42)).unwrap();
//! let ids = schema.get_table("t").unwrap().get_attribute("id").unwrap().data().unwrap();
//! assert_eq!(ids.len(), 3);
//! assert_eq!(ids[2], GeneratedValue::Integer(2));
//! ```
//!
//! # Generation modes
//!
//! - `RANDOM` - Uniform values; strings of random letters
//! - `INCREASING` / `DECREASING` - Arithmetic progressions from `start` by `step`
//! - `REPEATING` - Integers and reals cycling through `0..step`; strings
//!   cycling through a pool of `length` distinct values
//! - `NAMESURNAME`, `EMAIL`, `PHONE`, `NATURALTEXT` - Realistic strings
//!   drawn from the word lists

pub mod attribute;
pub mod generators;
pub mod options;
pub mod schema;
pub mod table;
pub mod words;

// Re-exports for convenience
pub use attribute::{
    Attribute, AttributeKind, AttributeRef, Binding, Column, ForeignKey, DEFAULT_STRING_LENGTH,
};
pub use generators::{ValueGenerator, Values};
pub use options::{ForeignKeySampling, GenerateOptions, GenerationContext, GenerationOrder};
pub use schema::{AttributeView, Reference, Schema};
pub use table::{Siblings, Table};
pub use words::WordLists;
