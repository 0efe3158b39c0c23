//! Definition types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Column appended to every export so rows can be traced back to NetBox
pub const IDENTIFIER_COLUMN: &str = "id";

/// On-disk shape of a definition file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionFile {
    /// Field paths to export, in column order
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

/// A validated export definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDefinition {
    /// Source file
    pub path: PathBuf,
    /// File name without extension (`1-regions`), reused for the output file
    pub stem: String,
    /// Numeric run-order prefix
    pub order: Option<u64>,
    /// Object type (`regions`)
    pub object_type: String,
    /// Configured field paths
    pub fields: Vec<String>,
}

impl ExportDefinition {
    /// Output columns: the configured fields, then the identifier column
    pub fn columns(&self) -> Vec<String> {
        let mut columns = self.fields.clone();
        if !columns.iter().any(|c| c == IDENTIFIER_COLUMN) {
            columns.push(IDENTIFIER_COLUMN.to_string());
        }
        columns
    }

    /// File name of the definition, for messages
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.stem.clone())
    }
}
