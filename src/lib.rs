//! mockdb library
//!
//! Generates mock relational datasets from a declarative schema document and
//! writes them as CSV files and SQL scripts.
//!
//! # Workspace crates
//!
//! - `mockdb_core` - Column types, generation modes, values, schema documents, errors
//! - `mockdb_generator` - Value generators and the table/attribute model
//! - `mockdb_csv` - CSV emitter
//! - `mockdb_sql` - SQL emitter (PostgreSQL and Oracle)
//!
//! # CLI Usage
//!
//! ```bash
//! # Validate a schema and generate its data without writing anything
//! mockdb -f shop.json
//!
//! # CSV files and a PostgreSQL script, reproducible with a seed
//! mockdb -f shop.json --csv --sql --seed 42 -o out/
//!
//! # Oracle script from a YAML document
//! mockdb -f shop.yaml --sql --dialect oracle
//! ```

use anyhow::Context;
use clap::{Args, ValueEnum};
use mockdb_csv::{CsvArgs, CsvWriter, WriteMetrics};
use mockdb_generator::{ForeignKeySampling, GenerateOptions, GenerationOrder, Schema, WordLists};
use mockdb_sql::{SqlArgs, SqlMetrics, SqlWriter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

pub use mockdb_csv as csv;
pub use mockdb_generator as generator;
pub use mockdb_sql as sql;

/// Order in which attribute data is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OrderArg {
    /// Plain columns first, then foreign keys, so keys copy their targets
    #[default]
    Dependency,
    /// Tables and attributes as declared in the document
    Declared,
}

impl From<OrderArg> for GenerationOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Dependency => GenerationOrder::Dependency,
            OrderArg::Declared => GenerationOrder::Declared,
        }
    }
}

/// How a foreign key picks its value for each written row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SamplingArg {
    /// Random index into the referenced data
    #[default]
    Random,
    /// Row i takes index i modulo the referenced length
    Positional,
}

impl From<SamplingArg> for ForeignKeySampling {
    fn from(arg: SamplingArg) -> Self {
        match arg {
            SamplingArg::Random => ForeignKeySampling::Random,
            SamplingArg::Positional => ForeignKeySampling::Positional,
        }
    }
}

/// Options of the `mockdb` command.
#[derive(Args, Clone, Debug)]
pub struct GenerateOpts {
    /// Path to the schema document (JSON, or YAML by extension)
    #[arg(long, short = 'f', env = "MOCKDB_FILE")]
    pub file: PathBuf,

    /// Directory output files are written to
    #[arg(long, short = 'o', default_value = ".", env = "MOCKDB_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Schema name used for output paths (default: file stem)
    #[arg(long, env = "MOCKDB_NAME")]
    pub name: Option<String>,

    /// Random seed for reproducible output (same seed = same data)
    #[arg(long, env = "MOCKDB_SEED")]
    pub seed: Option<u64>,

    /// Order in which attribute data is generated
    #[arg(long, value_enum, default_value_t = OrderArg::Dependency, env = "MOCKDB_ORDER")]
    pub order: OrderArg,

    /// How foreign keys pick their value for each row
    #[arg(long, value_enum, default_value_t = SamplingArg::Random, env = "MOCKDB_FK_SAMPLING")]
    pub fk_sampling: SamplingArg,

    /// Directory with female_names.txt, male_names.txt, surnames.txt and words.txt
    #[arg(long, env = "MOCKDB_WORD_LISTS")]
    pub word_lists: Option<PathBuf>,

    #[command(flatten)]
    pub csv: CsvArgs,

    #[command(flatten)]
    pub sql: SqlArgs,
}

impl GenerateOpts {
    /// Options with every setting at its default for `file`.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            output_dir: PathBuf::from("."),
            name: None,
            seed: None,
            order: OrderArg::default(),
            fk_sampling: SamplingArg::default(),
            word_lists: None,
            csv: CsvArgs::default(),
            sql: SqlArgs::default(),
        }
    }
}

/// What a run generated and wrote.
#[derive(Debug)]
pub struct GenerateReport {
    pub schema: Schema,
    /// Seed the run used, drawn from entropy when none was given
    pub seed: u64,
    pub csv: Vec<WriteMetrics>,
    pub sql: Option<SqlMetrics>,
}

/// Load, resolve and generate the schema, then write the requested outputs.
///
/// Nothing is written unless the whole schema generated successfully.
pub fn run_generate(opts: &GenerateOpts) -> anyhow::Result<GenerateReport> {
    let seed = opts.seed.unwrap_or_else(rand::random);
    let mut options = GenerateOptions::default()
        .with_seed(seed)
        .with_order(opts.order.into());
    if let Some(dir) = &opts.word_lists {
        let words = WordLists::from_dir(dir)
            .with_context(|| format!("Failed to load word lists from {dir:?}"))?;
        options = options.with_words(Arc::new(words));
    }

    let doc = mockdb_core::SchemaDocument::from_file(&opts.file)
        .with_context(|| format!("Failed to load schema from {:?}", opts.file))?;
    let name = opts
        .name
        .clone()
        .unwrap_or_else(|| Schema::name_from_path(&opts.file));

    tracing::info!(
        "Generating schema '{}' ({} tables, order={}, seed={})",
        name,
        doc.tables.len(),
        options.order,
        seed
    );
    let schema = Schema::from_document(name, &doc, &options)
        .with_context(|| format!("Failed to generate schema from {:?}", opts.file))?;

    let sampling: ForeignKeySampling = opts.fk_sampling.into();
    let mut report = GenerateReport {
        schema,
        seed,
        csv: Vec::new(),
        sql: None,
    };

    if opts.csv.enabled {
        let writer = CsvWriter::new(&opts.output_dir)
            .with_header(!opts.csv.no_header)
            .with_sampling(sampling);
        report.csv = writer
            .write_schema(&report.schema, &mut StdRng::seed_from_u64(seed))
            .with_context(|| {
                format!(
                    "Failed to write CSV files to {:?}",
                    writer.schema_dir(&report.schema)
                )
            })?;
    }

    if opts.sql.enabled {
        let writer = SqlWriter::new(&opts.output_dir)
            .with_dialect(opts.sql.dialect)
            .with_sampling(sampling);
        let metrics = writer
            .write_schema(&report.schema, &mut StdRng::seed_from_u64(seed))
            .with_context(|| {
                format!(
                    "Failed to write SQL script {:?}",
                    writer.script_path(&report.schema)
                )
            })?;
        report.sql = Some(metrics);
    }

    if !opts.csv.enabled && !opts.sql.enabled {
        tracing::info!(
            "Schema '{}' is valid; pass --csv or --sql to write output",
            report.schema.name()
        );
    }

    Ok(report)
}
