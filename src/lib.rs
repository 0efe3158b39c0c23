// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # netbox-export
//!
//! Export NetBox objects to per-type CSV files, driven by declarative field
//! lists.
//!
//! ## Features
//!
//! - **Definition files**: `conf/<N>-<object-type>.yml` lists the fields to export
//! - **Dotted field paths**: `site.region.name`, `tags.slug`, nested objects and lists
//! - **Pagination**: follows `next` links, or computes `offset`/`limit` locally
//! - **Token auth**: legacy `Token` keys and `nbt_` bearer tokens
//! - **CSV output**: one quoted CSV file per definition, ending with an `id` column
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use netbox_export::config::ConnectionSettings;
//! use netbox_export::engine::{ExportConfig, Exporter};
//! use netbox_export::http::HttpClient;
//! use netbox_export::loader::load_definitions;
//!
//! #[tokio::main]
//! async fn main() -> netbox_export::Result<()> {
//!     let settings = ConnectionSettings::from_env(None, None)?;
//!     let client = HttpClient::with_auth(settings.http_config(), settings.auth)?;
//!
//!     let defs = load_definitions("conf")?;
//!     let mut exporter = Exporter::new(client, ExportConfig::new());
//!     let report = exporter.export_all(&defs).await?;
//!     println!("{} rows", report.stats.rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! conf/*.yml ──► loader ──► registry ──► http + pagination ──► decode
//!                                                                │
//!                 output/<stem>.csv ◄── output ◄── extract ◄─────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API token authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// List page decoding
pub mod decode;

/// Field path resolution and row flattening
pub mod extract;

/// CSV output
pub mod output;

/// Object type to endpoint mapping
pub mod registry;

/// Definition file loader
pub mod loader;

/// Export engine
pub mod engine;

/// Runtime configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use engine::{ExportConfig, ExportOutcome, ExportReport, Exporter};
pub use loader::{load_definition, load_definitions, ExportDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
