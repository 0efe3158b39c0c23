//! Execution engine module
//!
//! Runs definitions through fetch → flatten → write.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Exporter` - pages through list endpoints and writes one file per definition
//! - `ExportConfig` - configuration for a run
//! - `ExportReport` - per-definition outcomes and statistics

mod types;

pub use types::{ExportConfig, ExportOutcome, ExportReport, ExportStats};

use crate::decode::JsonDecoder;
use crate::error::Result;
use crate::extract::RowExtractor;
use crate::http::{HttpClient, RequestConfig};
use crate::loader::ExportDefinition;
use crate::output::{output_path, CsvExportWriter};
use crate::pagination::{paginator_for, NextPage, PaginationState, Paginator};
use crate::registry::{resolve_endpoint, Endpoint};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Records fetched from one list endpoint
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// All records, in API order
    pub records: Vec<Value>,
    /// Pages requested
    pub pages: usize,
}

/// Export engine
pub struct Exporter {
    /// HTTP client
    client: HttpClient,
    /// Run configuration
    config: ExportConfig,
    /// Pagination strategy
    paginator: Box<dyn Paginator>,
    /// List page decoder
    decoder: JsonDecoder,
    /// Statistics
    stats: ExportStats,
}

impl Exporter {
    /// Create a new exporter
    pub fn new(client: HttpClient, config: ExportConfig) -> Self {
        let paginator = paginator_for(config.pagination, config.page_size);
        Self {
            client,
            config,
            paginator,
            decoder: JsonDecoder::netbox(),
            stats: ExportStats::default(),
        }
    }

    /// Get the run configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Get statistics
    pub fn stats(&self) -> &ExportStats {
        &self.stats
    }

    /// Fetch every record from a list endpoint
    pub async fn fetch_all(&self, endpoint: &Endpoint) -> Result<FetchResult> {
        let mut result = FetchResult::default();
        let mut state = PaginationState::new();

        let mut url = endpoint.list_path();
        let mut params = self.paginator.initial_params(&state);

        loop {
            let mut req_config = RequestConfig::new();
            for (key, value) in &params {
                req_config = req_config.query(key, value);
            }

            let response = self.client.get_with_config(&url, req_config).await?;
            let body = response.text().await?;
            let page = self.decoder.decode(&body)?;

            result.pages += 1;
            let record_count = page.records.len();
            debug!(
                "{endpoint} page {}: fetched {record_count} records",
                result.pages
            );
            result.records.extend(page.records);

            if self.config.max_records > 0 && result.records.len() >= self.config.max_records {
                result.records.truncate(self.config.max_records);
                break;
            }

            match self
                .paginator
                .process_response(&page.body, record_count, &mut state)
            {
                NextPage::Continue {
                    query_params,
                    url: next_url,
                } => {
                    // A `next` link carries its own query string
                    if let Some(next_url) = next_url {
                        url = next_url;
                        params.clear();
                    } else {
                        params = query_params;
                    }
                }
                NextPage::Done => break,
            }
        }

        Ok(result)
    }

    /// Export a single definition
    ///
    /// API failures skip the definition; local write failures are returned.
    pub async fn export_definition(&mut self, def: &ExportDefinition) -> Result<ExportOutcome> {
        let outcome = self.run_definition(def).await?;
        self.stats.record(&outcome);
        Ok(outcome)
    }

    async fn run_definition(&mut self, def: &ExportDefinition) -> Result<ExportOutcome> {
        let endpoint = match resolve_endpoint(&def.object_type) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!("{e}. Skipping {}", def.file_name());
                return Ok(skipped(def, e.to_string()));
            }
        };

        let fetched = match self.fetch_all(&endpoint).await {
            Ok(fetched) => fetched,
            Err(e) if e.is_skippable() => {
                error!(
                    "Error querying NetBox for {}: {e}. Skipping {}",
                    def.object_type,
                    def.file_name()
                );
                return Ok(skipped(def, e.to_string()));
            }
            Err(e) => return Err(e),
        };
        self.stats.add_pages(fetched.pages);

        let columns = def.columns();
        let extractor = RowExtractor::new(&columns);
        let path = output_path(&self.config.output_dir, &def.stem);

        let mut writer = CsvExportWriter::create(&path, &columns, &self.config.writer)?;
        for record in &fetched.records {
            writer.write_row(&extractor.extract(record))?;
        }
        let rows = writer.finish()?;

        info!(
            "Successfully exported {rows} {} to {}",
            def.object_type,
            path.display()
        );

        Ok(ExportOutcome::Exported {
            object_type: def.object_type.clone(),
            path,
            rows,
        })
    }

    /// Export definitions in order
    pub async fn export_all(&mut self, defs: &[ExportDefinition]) -> Result<ExportReport> {
        let start = Instant::now();
        let mut outcomes = Vec::new();

        for def in defs {
            if !self.config.selects(&def.object_type) {
                debug!("Skipping {}: not selected", def.file_name());
                continue;
            }
            let outcome = self.export_definition(def).await?;
            outcomes.push((def.file_name(), outcome));
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);

        Ok(ExportReport {
            outcomes,
            stats: self.stats.clone(),
        })
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = ExportStats::default();
    }
}

fn skipped(def: &ExportDefinition, reason: String) -> ExportOutcome {
    ExportOutcome::Skipped {
        object_type: def.object_type.clone(),
        reason,
    }
}
