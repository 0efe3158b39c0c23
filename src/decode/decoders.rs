//! JSON page decoder

use crate::error::{Error, Result};
use serde_json::Value;

/// A decoded list page
#[derive(Debug, Clone)]
pub struct DecodedPage {
    /// Full response body, used for pagination decisions
    pub body: Value,
    /// Records extracted from the body
    pub records: Vec<Value>,
}

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Dot path to the records array
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder that treats the whole body as records
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Decoder for NetBox list endpoints (`results` array)
    pub fn netbox() -> Self {
        Self::with_path("results")
    }

    /// Parse a response body and extract its records
    pub fn decode(&self, body: &str) -> Result<DecodedPage> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
        let records = self.extract_records(&value)?;
        Ok(DecodedPage {
            body: value,
            records,
        })
    }

    /// Extract records from a JSON value using the configured path
    pub fn extract_records(&self, value: &Value) -> Result<Vec<Value>> {
        // Endpoints without pagination hand back a bare array
        if let Value::Array(arr) = value {
            return Ok(arr.clone());
        }

        match &self.record_path {
            Some(path) => match extract_simple_path(value, path) {
                Some(Value::Array(arr)) => Ok(arr),
                Some(Value::Null) => Ok(vec![]),
                Some(v) => Ok(vec![v]),
                None => Err(Error::RecordExtraction {
                    path: path.clone(),
                    message: "path not present in response".to_string(),
                }),
            },
            None => Ok(vec![value.clone()]),
        }
    }
}

/// Walk a dot path through nested objects
fn extract_simple_path(value: &Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        current = current.get(part)?;
    }

    Some(current.clone())
}
