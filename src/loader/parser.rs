//! YAML parser for export definitions
//!
//! Loads, validates and orders the definition files in a directory.

use crate::error::{Error, Result};
use crate::loader::types::{DefinitionFile, ExportDefinition};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// `<N>-<object-type>` file stems
static DEFINITION_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(.+)$").unwrap());

/// Leading run-order prefix, used for sorting only
static ORDER_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)-").unwrap());

const DEFINITION_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Split a file stem like `12-ip-addresses` into `(12, "ip-addresses")`
pub fn parse_definition_name(stem: &str) -> Option<(Option<u64>, String)> {
    let caps = DEFINITION_NAME_REGEX.captures(stem)?;
    let order = caps[1].parse::<u64>().ok();
    Some((order, caps[2].to_string()))
}

/// Load an export definition from a file
pub fn load_definition(path: impl AsRef<Path>) -> Result<ExportDefinition> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::definition(path.display().to_string(), format!("failed to read: {e}"))
        }
    })?;

    load_definition_from_str(path, &content)
}

/// Load an export definition from YAML content belonging to `path`
pub fn load_definition_from_str(path: impl AsRef<Path>, yaml: &str) -> Result<ExportDefinition> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let file: DefinitionFile = if yaml.trim().is_empty() {
        DefinitionFile::default()
    } else {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::definition(&display, format!("failed to parse YAML: {e}")))?
    };

    let fields = validate_fields(&display, file.fields.unwrap_or_default())?;

    let (order, object_type) = parse_definition_name(&stem).ok_or_else(|| {
        Error::definition(
            &display,
            format!("invalid file name '{file_name}', expected format 'N-objecttype.yml'"),
        )
    })?;

    debug!(
        "Loaded definition {} ({} fields) for {}",
        file_name,
        fields.len(),
        object_type
    );

    Ok(ExportDefinition {
        path: path.to_path_buf(),
        stem,
        order,
        object_type,
        fields,
    })
}

/// Trim field names and reject empty lists or blank entries
fn validate_fields(display: &str, fields: Vec<String>) -> Result<Vec<String>> {
    if fields.is_empty() {
        return Err(Error::definition(display, "no fields specified"));
    }

    fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let field = field.trim().to_string();
            if field.is_empty() {
                Err(Error::definition(
                    display,
                    format!("field #{} is blank", i + 1),
                ))
            } else {
                Ok(field)
            }
        })
        .collect()
}

/// Find definition files in a directory, in run order
///
/// Files are ordered by their numeric prefix; files without one go last.
/// Ties fall back to the file name.
pub fn discover_definitions(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::config(format!(
            "{} directory does not exist",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_definition = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| DEFINITION_EXTENSIONS.contains(&ext));
        if is_definition {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let order = ORDER_PREFIX_REGEX
            .captures(&name)
            .and_then(|caps| caps[1].parse::<u64>().ok());
        (order.is_none(), order.unwrap_or(0), name)
    });

    Ok(files)
}

/// Discover and load every definition in a directory
pub fn load_definitions(dir: impl AsRef<Path>) -> Result<Vec<ExportDefinition>> {
    discover_definitions(dir)?
        .iter()
        .map(load_definition)
        .collect()
}
