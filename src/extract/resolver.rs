//! Field path resolution and value flattening

use crate::types::{JsonObject, Row};
use serde_json::Value;

/// Separator used when a list collapses into one cell
pub const LIST_SEPARATOR: &str = ",";

/// Keys tried, in order, when a nested object stands in for a single cell.
/// `value`/`label` cover choice fields such as `status`.
const NESTED_OBJECT_KEYS: &[&str] = &["name", "slug", "id", "value", "label"];

/// Keys tried first for each element of a list (tags are best known by slug)
const LIST_ITEM_KEYS: &[&str] = &["slug", "name"];

/// A parsed dotted field path such as `tenant.slug`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(|s| s.trim().to_string()).collect(),
        }
    }

    /// Path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve this path against a record into an unnormalized cell value
    pub fn resolve(&self, record: &Value) -> String {
        resolve_segments(record, &self.segments)
    }
}

/// Resolve a dotted field path against a record
///
/// Missing keys and nulls anywhere along the path give an empty string.
/// When the walk meets an array with segments left, the rest of the path
/// is resolved on every element and the non-empty results are joined.
pub fn resolve_field(record: &Value, path: &str) -> String {
    FieldPath::parse(path).resolve(record)
}

fn resolve_segments(value: &Value, segments: &[String]) -> String {
    let Some((head, rest)) = segments.split_first() else {
        return render_value(value);
    };

    match value {
        Value::Object(map) => match map.get(head) {
            Some(child) => resolve_segments(child, rest),
            None => String::new(),
        },
        Value::Array(items) => {
            join_non_empty(items.iter().map(|item| resolve_segments(item, segments)))
        }
        _ => String::new(),
    }
}

/// Render a terminal value as a single cell
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => render_object(map),
        Value::Array(items) => join_non_empty(items.iter().map(render_list_item)),
    }
}

fn render_object(map: &JsonObject) -> String {
    first_present(map, NESTED_OBJECT_KEYS)
        .unwrap_or_else(|| Value::Object(map.clone()).to_string())
}

fn render_list_item(item: &Value) -> String {
    match item {
        Value::Object(map) => {
            first_present(map, LIST_ITEM_KEYS).unwrap_or_else(|| render_object(map))
        }
        other => render_value(other),
    }
}

fn first_present(map: &JsonObject, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|v| !v.is_null())
        .map(render_value)
}

fn join_non_empty(values: impl Iterator<Item = String>) -> String {
    values
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Flatten a cell onto one line: line breaks become spaces, whitespace
/// runs collapse to one space, and the ends are trimmed
pub fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract a normalized row for the given columns
pub fn extract_row(record: &Value, columns: &[String]) -> Row {
    RowExtractor::new(columns).extract(record)
}

/// Pre-parsed column paths, reused across every record of an export
#[derive(Debug, Clone)]
pub struct RowExtractor {
    paths: Vec<FieldPath>,
}

impl RowExtractor {
    /// Parse the column paths once
    pub fn new(columns: &[String]) -> Self {
        Self {
            paths: columns.iter().map(|c| FieldPath::parse(c)).collect(),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.paths.len()
    }

    /// Extract one normalized row
    pub fn extract(&self, record: &Value) -> Row {
        self.paths
            .iter()
            .map(|path| normalize(&path.resolve(record)))
            .collect()
    }
}
