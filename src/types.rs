//! Common types used throughout netbox-export
//!
//! Shared type aliases and small enums used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// One flattened output row, in column order
pub type Row = Vec<String>;

// ============================================================================
// Pagination Mode
// ============================================================================

/// How list endpoints are paged through
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationMode {
    /// Follow the `next` URL returned in each page body
    #[default]
    NextUrl,
    /// Compute `offset`/`limit` query parameters locally
    Offset,
}

impl std::fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NextUrl => write!(f, "next-url"),
            Self::Offset => write!(f, "offset"),
        }
    }
}
