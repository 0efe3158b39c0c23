//! CSV file writer
//!
//! Every cell is quoted by default so multi-value cells (`core,prod`) and
//! free text survive a round trip through spreadsheet tools.

use crate::error::{Error, Result, ResultExt};
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Output file for a definition stem: `<dir>/<stem>.csv`
pub fn output_path(dir: impl AsRef<Path>, stem: &str) -> PathBuf {
    dir.as_ref().join(format!("{stem}.csv"))
}

/// Configuration for the CSV writer
#[derive(Debug, Clone)]
pub struct CsvWriterConfig {
    delimiter: u8,
    quote_all: bool,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_all: true,
        }
    }
}

impl CsvWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Quote every field, or only those that need it
    #[must_use]
    pub fn with_quote_all(mut self, quote_all: bool) -> Self {
        self.quote_all = quote_all;
        self
    }

    /// Get the field delimiter
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .double_quote(true)
            .quote_style(if self.quote_all {
                QuoteStyle::Always
            } else {
                QuoteStyle::Necessary
            });
        builder
    }
}

/// Writes one export file
pub struct CsvExportWriter {
    writer: Writer<BufWriter<File>>,
    path: PathBuf,
    width: usize,
    rows_written: usize,
}

impl CsvExportWriter {
    /// Create the file (and its parent directories) and write the header row
    pub fn create(
        path: impl AsRef<Path>,
        header: &[String],
        config: &CsvWriterConfig,
    ) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::output(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let file = File::create(path).map_err(|e| {
            Error::output(format!("Failed to create file {}: {e}", path.display()))
        })?;

        let mut writer = config.builder().from_writer(BufWriter::new(file));
        writer.write_record(header)?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            width: header.len(),
            rows_written: 0,
        })
    }

    /// Write one row; its width must match the header
    pub fn write_row(&mut self, row: &[String]) -> Result<()> {
        if row.len() != self.width {
            return Err(Error::output(format!(
                "Row has {} fields, header has {}",
                row.len(),
                self.width
            )));
        }

        self.writer.write_record(row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Get the number of rows written so far
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Path being written
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush the file and return the number of data rows written
    pub fn finish(mut self) -> Result<usize> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(self.rows_written)
    }
}
