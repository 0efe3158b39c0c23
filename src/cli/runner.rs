//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{parse_delimiter, ConnectionSettings};
use crate::engine::{ExportConfig, ExportOutcome, ExportReport, Exporter};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::loader::{discover_definitions, load_definition, load_definitions, ExportDefinition};
use crate::output::CsvWriterConfig;
use crate::registry::{known_object_types, resolve_endpoint, Endpoint};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Path of the NetBox status endpoint
const STATUS_PATH: &str = "/api/status/";

/// Result of checking one definition file
#[derive(Debug)]
pub struct ValidationEntry {
    /// Definition file
    pub path: PathBuf,
    /// The parsed definition and its endpoint, or why it is unusable
    pub result: Result<(ExportDefinition, Endpoint)>,
}

impl ValidationEntry {
    /// Check if the file can be exported
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

/// Parse every definition in a directory and resolve its endpoint
///
/// Unlike [`load_definitions`], a bad file does not stop the scan.
pub fn validate_definitions(dir: impl AsRef<Path>) -> Result<Vec<ValidationEntry>> {
    let entries = discover_definitions(dir)?
        .into_iter()
        .map(|path| {
            let result = load_definition(&path).and_then(|def| {
                let endpoint = resolve_endpoint(&def.object_type)?;
                Ok((def, endpoint))
            });
            ValidationEntry { path, result }
        })
        .collect();
    Ok(entries)
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            None => self.export(&[], 0, false).await,
            Some(Commands::Export {
                only,
                max_records,
                strict,
            }) => self.export(only, *max_records, *strict).await,
            Some(Commands::Check) => self.check().await,
            Some(Commands::Validate) => self.validate(),
            Some(Commands::Types) => {
                self.types();
                Ok(())
            }
        }
    }

    /// Resolve connection settings from flags and environment
    fn connection(&self) -> Result<ConnectionSettings> {
        Ok(
            ConnectionSettings::from_env(self.cli.url.as_deref(), self.cli.token.as_deref())?
                .with_timeout(Duration::from_secs(self.cli.timeout))
                .with_insecure(self.cli.insecure),
        )
    }

    /// Build an authenticated client
    fn client(&self) -> Result<HttpClient> {
        let settings = self.connection()?;
        debug!("Connecting to {} ({:?})", settings.url, settings.auth);
        HttpClient::with_auth(settings.http_config(), settings.auth)
    }

    /// Build the export configuration
    fn export_config(&self, only: &[String], max_records: usize) -> Result<ExportConfig> {
        let writer = CsvWriterConfig::new().with_delimiter(parse_delimiter(&self.cli.delimiter)?);
        let only = only
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(ExportConfig::new()
            .with_output_dir(&self.cli.output_dir)
            .with_page_size(self.cli.page_size)
            .with_pagination(self.cli.pagination)
            .with_writer(writer)
            .with_max_records(max_records)
            .with_object_types(only))
    }

    /// Export every definition
    async fn export(&self, only: &[String], max_records: usize, strict: bool) -> Result<()> {
        let config = self.export_config(only, max_records)?;
        let defs = load_definitions(&self.cli.conf_dir)?;

        if defs.is_empty() {
            println!(
                "No YAML configuration files found in {} directory",
                self.cli.conf_dir.display()
            );
            return Ok(());
        }

        info!(
            "Exporting {} definition(s) from {} to {}",
            defs.len(),
            self.cli.conf_dir.display(),
            config.output_dir.display()
        );

        let mut exporter = Exporter::new(self.client()?, config);
        let report = exporter.export_all(&defs).await?;
        print_report(&report);

        if strict && report.has_skipped() {
            return Err(Error::Other(format!(
                "{} object type(s) skipped",
                report.stats.skipped
            )));
        }

        Ok(())
    }

    /// Check the connection
    async fn check(&self) -> Result<()> {
        let client = self.client()?;
        let status: Value = client.get_json(STATUS_PATH).await?;

        let version = status
            .get("netbox-version")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let base = client.config().base_url.as_deref().unwrap_or_default();

        println!("Connected to NetBox {version} at {base}");
        Ok(())
    }

    /// Validate definition files
    fn validate(&self) -> Result<()> {
        let entries = validate_definitions(&self.cli.conf_dir)?;

        if entries.is_empty() {
            println!(
                "No YAML configuration files found in {} directory",
                self.cli.conf_dir.display()
            );
            return Ok(());
        }

        for entry in &entries {
            let name = entry.path.display();
            match &entry.result {
                Ok((def, endpoint)) => println!(
                    "ok    {name} -> {} ({} columns)",
                    endpoint.list_path(),
                    def.columns().len()
                ),
                Err(e) => println!("FAIL  {name}: {e}"),
            }
        }

        let invalid = entries.iter().filter(|e| !e.is_valid()).count();
        if invalid > 0 {
            return Err(Error::config(format!(
                "{invalid} of {} definition file(s) invalid",
                entries.len()
            )));
        }

        println!("{} definition file(s) valid", entries.len());
        Ok(())
    }

    /// List built-in object types
    fn types(&self) {
        for (name, endpoint) in known_object_types() {
            println!("{name:<32} {}", endpoint.list_path());
        }
    }
}

fn print_report(report: &ExportReport) {
    for (file, outcome) in &report.outcomes {
        match outcome {
            ExportOutcome::Exported { path, rows, .. } => {
                println!("exported  {file} -> {} ({rows} rows)", path.display());
            }
            ExportOutcome::Skipped { reason, .. } => {
                println!("skipped   {file}: {reason}");
            }
        }
    }

    let stats = &report.stats;
    println!(
        "{} exported, {} skipped, {} rows, {} pages in {}ms",
        stats.exported, stats.skipped, stats.rows, stats.pages, stats.duration_ms
    );
}
