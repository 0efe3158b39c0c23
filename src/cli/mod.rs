//! CLI module
//!
//! Command-line interface for exporting NetBox data.
//!
//! # Commands
//!
//! - `export` - Export every definition to CSV (default when no command is given)
//! - `check` - Test the connection to NetBox
//! - `validate` - Check definition files without touching the network
//! - `types` - List the built-in object types

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{validate_definitions, Runner, ValidationEntry};
