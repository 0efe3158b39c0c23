//! Definition loader module
//!
//! Parse export definitions from YAML files.
//!
//! # Overview
//!
//! Each file under the configuration directory describes one export:
//!
//! ```yaml
//! # conf/2-sites.yml
//! fields:
//!   - name
//!   - slug
//!   - region
//!   - tenant.slug
//!   - tags
//! ```
//!
//! The file name carries the run order and the object type:
//! `<N>-<object-type>.yml`.

mod parser;
mod types;

pub use parser::{
    discover_definitions, load_definition, load_definition_from_str, load_definitions,
    parse_definition_name,
};
pub use types::{DefinitionFile, ExportDefinition, IDENTIFIER_COLUMN};
