//! SQL script writer for generated schemas.

use crate::dialect::SqlDialect;
use crate::error::SqlWriterError;
use mockdb_core::DbType;
use mockdb_generator::{ForeignKeySampling, Schema};
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Metrics from writing a script.
#[derive(Debug, Clone, Default)]
pub struct SqlMetrics {
    /// Path of the written script.
    pub path: PathBuf,
    /// Statements written, inserts included.
    pub statements: u64,
    /// INSERT statements written.
    pub rows_written: u64,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

/// Writes a generated schema as `<dir>/<schema>.sql`.
#[derive(Debug, Clone)]
pub struct SqlWriter {
    output_dir: PathBuf,
    dialect: SqlDialect,
    sampling: ForeignKeySampling,
}

impl SqlWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dialect: SqlDialect::default(),
            sampling: ForeignKeySampling::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set how foreign keys pick their value for each row.
    pub fn with_sampling(mut self, sampling: ForeignKeySampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Path the script of `schema` is written to.
    pub fn script_path(&self, schema: &Schema) -> PathBuf {
        self.output_dir.join(format!("{}.sql", schema.name()))
    }

    /// Write the script of `schema`.
    ///
    /// Every table is checked for data before the file is created.
    pub fn write_schema<R: Rng + ?Sized>(
        &self,
        schema: &Schema,
        rng: &mut R,
    ) -> Result<SqlMetrics, SqlWriterError> {
        let start_time = Instant::now();
        for idx in 0..schema.tables().len() {
            schema.attribute_views(idx)?;
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.script_path(schema);
        info!(
            "Writing {} script for schema '{}' to '{}'",
            self.dialect,
            schema.name(),
            path.display()
        );

        let file = File::create(&path)?;
        let mut out = BufWriter::new(file);
        let mut metrics = self.render(schema, &mut out, rng)?;
        out.flush()?;
        drop(out);

        metrics.file_size_bytes = std::fs::metadata(&path)?.len();
        metrics.path = path;
        metrics.total_duration = start_time.elapsed();

        info!(
            "Wrote '{}': {} statements ({} rows), {} bytes in {:?}",
            metrics.path.display(),
            metrics.statements,
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.total_duration
        );
        Ok(metrics)
    }

    /// Render the script of `schema` into `out`.
    pub fn render<W: Write, R: Rng + ?Sized>(
        &self,
        schema: &Schema,
        out: &mut W,
        rng: &mut R,
    ) -> Result<SqlMetrics, SqlWriterError> {
        let ddl = self.dialect.ddl();
        let views = (0..schema.tables().len())
            .map(|idx| schema.attribute_views(idx))
            .collect::<Result<Vec<_>, _>>()?;
        let mut metrics = SqlMetrics::default();

        for table in schema.tables() {
            writeln!(out, "{}", ddl.drop_table(table.name()))?;
            metrics.statements += 1;
        }

        for (table, views) in schema.tables().iter().zip(&views) {
            let columns: Vec<(&str, DbType, Option<usize>)> = views
                .iter()
                .map(|view| (view.name, view.db_type, view.length))
                .collect();
            writeln!(
                out,
                "{}",
                ddl.create_table(table.name(), &columns, &table.primary_key_names())
            )?;
            metrics.statements += 1;
        }

        for (table, views) in schema.tables().iter().zip(&views) {
            for view in views {
                if let Some(reference) = view.references {
                    writeln!(
                        out,
                        "{}",
                        ddl.foreign_key(
                            table.name(),
                            view.name,
                            reference.table,
                            reference.attribute
                        )
                    )?;
                    metrics.statements += 1;
                }
            }
        }

        for table in schema.tables() {
            let columns = table.attribute_names();
            for row in table.rows(self.sampling, rng) {
                writeln!(out, "{}", ddl.insert(table.name(), &columns, &row?))?;
                metrics.statements += 1;
                metrics.rows_written += 1;
            }
            debug!("Rendered {} rows of table '{}'", table.quantity(), table.name());
        }

        Ok(metrics)
    }
}
