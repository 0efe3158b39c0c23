//! CLI commands and argument parsing

use crate::config::{DEFAULT_CONF_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::types::PaginationMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Export NetBox objects to CSV files
#[derive(Parser, Debug)]
#[command(name = "netbox-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing definition files (N-objecttype.yml)
    #[arg(long, global = true, default_value = DEFAULT_CONF_DIR)]
    pub conf_dir: PathBuf,

    /// Directory receiving CSV files
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// NetBox URL [default: $NETBOX_URL or $NB_URL]
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API token [default: $NETBOX_API_KEY, $NB_API_KEY or $NETBOX_TOKEN]
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Records requested per page
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub page_size: u32,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// How list endpoints are paged through
    #[arg(long, global = true, value_enum, default_value_t = PaginationMode::NextUrl)]
    pub pagination: PaginationMode,

    /// Field delimiter (single character, or "tab")
    #[arg(short, long, global = true, default_value = ",")]
    pub delimiter: String,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every definition to CSV
    Export {
        /// Only export these object types (comma-separated)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Maximum records per object type (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_records: usize,

        /// Exit with an error if any object type was skipped
        #[arg(long)]
        strict: bool,
    },

    /// Test the connection to NetBox
    Check,

    /// Validate definition files without contacting NetBox
    Validate,

    /// List built-in object types and their API endpoints
    Types,
}
