//! Engine types
//!
//! Configuration, per-definition outcomes and run statistics.

use crate::output::CsvWriterConfig;
use crate::types::PaginationMode;
use std::path::PathBuf;

/// Configuration for an export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory receiving `<stem>.csv` files
    pub output_dir: PathBuf,
    /// Records requested per page
    pub page_size: u32,
    /// Pagination strategy
    pub pagination: PaginationMode,
    /// CSV formatting
    pub writer: CsvWriterConfig,
    /// Maximum records per object type (0 = unlimited)
    pub max_records: usize,
    /// Only export these object types (empty = all)
    pub object_types: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            page_size: 1000,
            pagination: PaginationMode::default(),
            writer: CsvWriterConfig::default(),
            max_records: 0,
            object_types: Vec::new(),
        }
    }
}

impl ExportConfig {
    /// Create a new export config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set page size
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set pagination mode
    #[must_use]
    pub fn with_pagination(mut self, mode: PaginationMode) -> Self {
        self.pagination = mode;
        self
    }

    /// Set CSV writer config
    #[must_use]
    pub fn with_writer(mut self, writer: CsvWriterConfig) -> Self {
        self.writer = writer;
        self
    }

    /// Set max records
    #[must_use]
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    /// Restrict the run to some object types
    #[must_use]
    pub fn with_object_types(mut self, types: Vec<String>) -> Self {
        self.object_types = types;
        self
    }

    /// Check whether an object type is selected by the filter
    pub fn selects(&self, object_type: &str) -> bool {
        self.object_types.is_empty() || self.object_types.iter().any(|t| t == object_type)
    }
}

/// Result of exporting one definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written
    Exported {
        /// Object type
        object_type: String,
        /// Output file
        path: PathBuf,
        /// Data rows written
        rows: usize,
    },
    /// Definition skipped, nothing written
    Skipped {
        /// Object type
        object_type: String,
        /// Why it was skipped
        reason: String,
    },
}

impl ExportOutcome {
    /// Check if this is an exported outcome
    pub fn is_exported(&self) -> bool {
        matches!(self, Self::Exported { .. })
    }

    /// Check if this is a skipped outcome
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Object type of the definition
    pub fn object_type(&self) -> &str {
        match self {
            Self::Exported { object_type, .. } | Self::Skipped { object_type, .. } => object_type,
        }
    }
}

/// Statistics from an export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Definitions written to disk
    pub exported: usize,
    /// Definitions skipped
    pub skipped: usize,
    /// Total data rows written
    pub rows: usize,
    /// Total pages fetched
    pub pages: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExportStats {
    /// Record an outcome
    pub fn record(&mut self, outcome: &ExportOutcome) {
        match outcome {
            ExportOutcome::Exported { rows, .. } => {
                self.exported += 1;
                self.rows += rows;
            }
            ExportOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    /// Add fetched pages
    pub fn add_pages(&mut self, count: usize) {
        self.pages += count;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Outcome per definition file name, in run order
    pub outcomes: Vec<(String, ExportOutcome)>,
    /// Aggregated statistics
    pub stats: ExportStats,
}

impl ExportReport {
    /// Check if any definition was skipped
    pub fn has_skipped(&self) -> bool {
        self.stats.skipped > 0
    }
}
