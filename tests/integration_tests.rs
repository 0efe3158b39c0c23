//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: conf/*.yml → NetBox list endpoints → output/*.csv

use clap::Parser;
use netbox_export::cli::{validate_definitions, Cli, Runner};
use netbox_export::config::ConnectionSettings;
use netbox_export::engine::{ExportConfig, ExportOutcome, Exporter};
use netbox_export::http::HttpClient;
use netbox_export::loader::load_definitions;
use netbox_export::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

const TOKEN: &str = "0123456789abcdef";

fn write_conf(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn runner(server: &MockServer, conf: &TempDir, output: &TempDir, args: &[&str]) -> Runner {
    runner_with(server, conf.path(), output, TOKEN, args)
}

fn runner_with(
    server: &MockServer,
    conf_dir: &Path,
    output: &TempDir,
    token: &str,
    args: &[&str],
) -> Runner {
    let conf_dir = conf_dir.to_string_lossy().to_string();
    let output_dir = output.path().to_string_lossy().to_string();
    let uri = server.uri();

    let mut argv = vec![
        "netbox-export",
        "--conf-dir",
        conf_dir.as_str(),
        "--output-dir",
        output_dir.as_str(),
        "--url",
        uri.as_str(),
        "--token",
        token,
    ];
    argv.extend_from_slice(args);

    Runner::new(Cli::try_parse_from(argv).unwrap())
}

fn read_output(output: &TempDir, file: &str) -> String {
    fs::read_to_string(output.path().join(file)).unwrap()
}

async fn mount_regions(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/dcim/regions/"))
        .and(header("Authorization", format!("Token {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id": 1, "name": "Europe", "slug": "europe", "parent": null},
                {"id": 2, "name": "Germany", "slug": "de", "parent": {"id": 1, "name": "Europe", "slug": "europe"}}
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_sites(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/dcim/sites/"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": format!("{}/api/dcim/sites/?limit=2&offset=2", server.uri()),
            "previous": null,
            "results": [
                {
                    "id": 10,
                    "name": "FRA1",
                    "status": {"value": "active", "label": "Active"},
                    "region": {"id": 2, "name": "Germany", "slug": "de"},
                    "tenant": null,
                    "tags": [{"id": 1, "name": "Core", "slug": "core"}, {"id": 2, "name": "Prod", "slug": "prod"}],
                    "comments": "Main\nsite"
                },
                {
                    "id": 11,
                    "name": "FRA2",
                    "status": {"value": "planned", "label": "Planned"},
                    "region": {"id": 2, "name": "Germany", "slug": "de"},
                    "tenant": {"id": 5, "name": "Acme", "slug": "acme"},
                    "tags": [],
                    "comments": ""
                }
            ]
        })))
        .up_to_n_times(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/sites/"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "previous": "x",
            "results": [
                {
                    "id": 12,
                    "name": "BER1",
                    "status": {"value": "active", "label": "Active"},
                    "region": null,
                    "tenant": null,
                    "tags": [{"id": 1, "name": "Core", "slug": "core"}],
                    "comments": null
                }
            ]
        })))
        .mount(server)
        .await;
}

const REGIONS_YML: &str = "fields:\n  - name\n  - slug\n  - parent\n";
const SITES_YML: &str =
    "fields:\n  - name\n  - status\n  - region.slug\n  - tenant\n  - tags\n  - comments\n";

// ============================================================================
// Export Tests
// ============================================================================

#[tokio::test]
async fn test_export_writes_one_file_per_definition() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    mount_regions(&server).await;
    mount_sites(&server).await;
    write_conf(
        conf.path(),
        &[("1-regions.yml", REGIONS_YML), ("2-sites.yml", SITES_YML)],
    );

    runner(&server, &conf, &output, &["--page-size", "2", "export"])
        .run()
        .await
        .unwrap();

    assert_eq!(
        read_output(&output, "1-regions.csv"),
        "\"name\",\"slug\",\"parent\",\"id\"\n\
         \"Europe\",\"europe\",\"\",\"1\"\n\
         \"Germany\",\"de\",\"Europe\",\"2\"\n"
    );
    assert_eq!(
        read_output(&output, "2-sites.csv"),
        "\"name\",\"status\",\"region.slug\",\"tenant\",\"tags\",\"comments\",\"id\"\n\
         \"FRA1\",\"active\",\"de\",\"\",\"core,prod\",\"Main site\",\"10\"\n\
         \"FRA2\",\"planned\",\"de\",\"Acme\",\"\",\"\",\"11\"\n\
         \"BER1\",\"active\",\"\",\"\",\"core\",\"\",\"12\"\n"
    );
}

#[tokio::test]
async fn test_export_is_default_command() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    mount_regions(&server).await;
    write_conf(conf.path(), &[("1-regions.yml", REGIONS_YML)]);

    runner(&server, &conf, &output, &[]).run().await.unwrap();

    assert!(output.path().join("1-regions.csv").exists());
}

#[tokio::test]
async fn test_export_skips_failed_and_unknown_types() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/dcim/regions/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    mount_sites(&server).await;

    write_conf(
        conf.path(),
        &[
            ("1-regions.yml", REGIONS_YML),
            ("2-widgets.yml", "fields:\n  - name\n"),
            ("3-sites.yml", SITES_YML),
        ],
    );

    runner(&server, &conf, &output, &["--page-size", "2"])
        .run()
        .await
        .unwrap();

    assert!(!output.path().join("1-regions.csv").exists());
    assert!(!output.path().join("2-widgets.csv").exists());
    assert!(output.path().join("3-sites.csv").exists());
}

#[tokio::test]
async fn test_export_strict_fails_on_skip() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    mount_regions(&server).await;
    write_conf(
        conf.path(),
        &[
            ("1-regions.yml", REGIONS_YML),
            ("2-widgets.yml", "fields:\n  - name\n"),
        ],
    );

    let err = runner(&server, &conf, &output, &["export", "--strict"])
        .run()
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "1 object type(s) skipped");
    assert!(output.path().join("1-regions.csv").exists());
}

#[tokio::test]
async fn test_export_only_selected_types() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    mount_regions(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/dcim/sites/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&server)
        .await;

    write_conf(
        conf.path(),
        &[("1-regions.yml", REGIONS_YML), ("2-sites.yml", SITES_YML)],
    );

    runner(&server, &conf, &output, &["export", "--only", "regions"])
        .run()
        .await
        .unwrap();

    assert!(output.path().join("1-regions.csv").exists());
    assert!(!output.path().join("2-sites.csv").exists());
}

#[tokio::test]
async fn test_export_offset_pagination_and_delimiter() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/ipam/vlans/"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "results": [{"id": 100, "vid": 10, "name": "mgmt"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ipam/vlans/"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "results": [{"id": 101, "vid": 20, "name": "users"}]
        })))
        .mount(&server)
        .await;

    write_conf(conf.path(), &[("5-vlans.yml", "fields:\n  - vid\n  - name\n")]);

    runner(
        &server,
        &conf,
        &output,
        &["--pagination", "offset", "--page-size", "1", "-d", ";"],
    )
    .run()
    .await
    .unwrap();

    assert_eq!(
        read_output(&output, "5-vlans.csv"),
        "\"vid\";\"name\";\"id\"\n\"10\";\"mgmt\";\"100\"\n\"20\";\"users\";\"101\"\n"
    );
}

#[tokio::test]
async fn test_export_bearer_token() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/tenancy/tenants/"))
        .and(header("Authorization", "Bearer nbt_abc.def"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "results": [{"id": 5, "name": "Acme"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    write_conf(conf.path(), &[("3-tenants.yml", "fields:\n  - name\n")]);

    runner_with(&server, conf.path(), &output, "nbt_abc.def", &[])
        .run()
        .await
        .unwrap();

    assert_eq!(
        read_output(&output, "3-tenants.csv"),
        "\"name\",\"id\"\n\"Acme\",\"5\"\n"
    );
}

#[tokio::test]
async fn test_export_empty_conf_dir() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    runner(&server, &conf, &output, &["export"])
        .run()
        .await
        .unwrap();

    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_export_missing_conf_dir() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();
    let missing = conf.path().join("nope");

    let err = runner_with(&server, &missing, &output, TOKEN, &[])
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config { .. }));
}

#[tokio::test]
async fn test_export_invalid_definition_aborts() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    write_conf(conf.path(), &[("1-regions.yml", "fields: [name\n")]);

    let err = runner(&server, &conf, &output, &[])
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidDefinition { .. }));
}

// ============================================================================
// Library API
// ============================================================================

#[tokio::test]
async fn test_library_export_report() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    mount_regions(&server).await;
    write_conf(
        conf.path(),
        &[
            ("1-regions.yml", REGIONS_YML),
            ("9-widgets.yml", "fields:\n  - name\n"),
        ],
    );

    let settings = ConnectionSettings::from_sources(Some(&server.uri()), Some(TOKEN), |_| None)
        .unwrap();
    let client = HttpClient::with_auth(settings.http_config(), settings.auth).unwrap();
    let defs = load_definitions(conf.path()).unwrap();

    let mut exporter = Exporter::new(client, ExportConfig::new().with_output_dir(output.path()));
    let report = exporter.export_all(&defs).await.unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0].0, "1-regions.yml");
    assert_eq!(
        report.outcomes[0].1,
        ExportOutcome::Exported {
            object_type: "regions".to_string(),
            path: output.path().join("1-regions.csv"),
            rows: 2,
        }
    );
    assert!(report.outcomes[1].1.is_skipped());
    assert_eq!(report.stats.exported, 1);
    assert_eq!(report.stats.skipped, 1);
    assert_eq!(report.stats.rows, 2);
    assert!(report.has_skipped());
}

// ============================================================================
// Other Commands
// ============================================================================

#[tokio::test]
async fn test_check_command() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .and(header("Authorization", format!("Token {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "netbox-version": "4.2.1",
            "python-version": "3.12.3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    runner(&server, &conf, &output, &["check"])
        .run()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_check_command_unauthorized() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Invalid token"})))
        .mount(&server)
        .await;

    let err = runner(&server, &conf, &output, &["check"])
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
}

#[test]
fn test_validate_definitions() {
    let conf = tempdir().unwrap();
    write_conf(
        conf.path(),
        &[
            ("1-regions.yml", REGIONS_YML),
            ("2-widgets.yml", "fields:\n  - name\n"),
            ("3-sites.yml", "fields:\n"),
            ("notes.txt", "ignored"),
        ],
    );

    let entries = validate_definitions(conf.path()).unwrap();
    let summary: Vec<(String, bool)> = entries
        .iter()
        .map(|e| {
            (
                e.path.file_name().unwrap().to_string_lossy().to_string(),
                e.is_valid(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("1-regions.yml".to_string(), true),
            ("2-widgets.yml".to_string(), false),
            ("3-sites.yml".to_string(), false),
        ]
    );

    let (def, endpoint) = entries[0].result.as_ref().unwrap();
    assert_eq!(def.columns(), vec!["name", "slug", "parent", "id"]);
    assert_eq!(endpoint.list_path(), "/api/dcim/regions/");
}

#[tokio::test]
async fn test_validate_command_fails_on_invalid_file() {
    let server = MockServer::start().await;
    let conf = tempdir().unwrap();
    let output = tempdir().unwrap();

    write_conf(
        conf.path(),
        &[("1-regions.yml", REGIONS_YML), ("widgets.yml", "fields:\n  - name\n")],
    );

    let err = runner(&server, &conf, &output, &["validate"])
        .run()
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Configuration error: 1 of 2 definition file(s) invalid"
    );
}

#[test]
fn test_cli_rejects_zero_page_size() {
    assert!(Cli::try_parse_from(["netbox-export", "--page-size", "0"]).is_err());
}
