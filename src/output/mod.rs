//! Output module
//!
//! Writes flattened rows to delimited files, one file per object type.

mod writer;

pub use writer::{output_path, CsvExportWriter, CsvWriterConfig};
