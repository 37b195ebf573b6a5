//! CSV writer for generated schemas.

use crate::error::CsvWriterError;
use crate::value::CsvValue;
use csv::Writer;
use mockdb_generator::{ForeignKeySampling, Schema};
use rand::Rng;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from writing one table.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Table the file holds.
    pub table: String,
    /// Path of the written file.
    pub path: PathBuf,
    /// Number of rows written, header excluded.
    pub rows_written: u64,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl WriteMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.file_size_bytes as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes every table of a generated schema to `<dir>/<schema>/<table>.csv`.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    output_dir: PathBuf,
    include_header: bool,
    sampling: ForeignKeySampling,
}

impl CsvWriter {
    /// Create a writer rooted at `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            include_header: true,
            sampling: ForeignKeySampling::default(),
        }
    }

    /// Set whether to include a header row in the CSV output.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Set how foreign keys pick their value for each row.
    pub fn with_sampling(mut self, sampling: ForeignKeySampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Directory the files of `schema` are written to.
    pub fn schema_dir(&self, schema: &Schema) -> PathBuf {
        self.output_dir.join(schema.name())
    }

    /// Write one file per table.
    ///
    /// Every table is checked for data before the directory is created, so
    /// an unpopulated schema leaves nothing behind.
    pub fn write_schema<R: Rng + ?Sized>(
        &self,
        schema: &Schema,
        rng: &mut R,
    ) -> Result<Vec<WriteMetrics>, CsvWriterError> {
        for idx in 0..schema.tables().len() {
            schema.attribute_views(idx)?;
        }

        let dir = self.schema_dir(schema);
        std::fs::create_dir_all(&dir)?;
        info!(
            "Writing {} CSV files to '{}'",
            schema.tables().len(),
            dir.display()
        );

        let mut metrics = Vec::with_capacity(schema.tables().len());
        for (idx, table) in schema.tables().iter().enumerate() {
            let path = dir.join(format!("{}.csv", table.name()));
            metrics.push(self.write_table(schema, idx, &path, rng)?);
        }
        Ok(metrics)
    }

    /// Write the table at `table_idx` to `output_path`.
    pub fn write_table<R: Rng + ?Sized, P: AsRef<Path>>(
        &self,
        schema: &Schema,
        table_idx: usize,
        output_path: P,
        rng: &mut R,
    ) -> Result<WriteMetrics, CsvWriterError> {
        let start_time = Instant::now();
        let views = schema.attribute_views(table_idx)?;
        let table = &schema.tables()[table_idx];

        let output_path = output_path.as_ref();
        let mut metrics = WriteMetrics {
            table: table.name().to_string(),
            path: output_path.to_path_buf(),
            ..Default::default()
        };

        let file = File::create(output_path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut writer = Writer::from_writer(buf_writer);

        if self.include_header {
            writer.write_record(views.iter().map(|view| view.name))?;
        }

        for row in table.rows(self.sampling, rng) {
            let record = row?.into_iter().map(CsvValue::from);
            writer.write_record(record)?;
            metrics.rows_written += 1;

            if metrics.rows_written % 10000 == 0 {
                debug!("Written {} rows", metrics.rows_written);
            }
        }

        writer.flush()?;
        let inner = writer
            .into_inner()
            .map_err(|e| CsvWriterError::Io(std::io::Error::other(e.to_string())))?;
        drop(inner);

        metrics.file_size_bytes = std::fs::metadata(output_path)?.len();
        metrics.total_duration = start_time.elapsed();

        info!(
            "Wrote '{}': {} rows, {} bytes in {:?} ({:.2} rows/sec)",
            output_path.display(),
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}
