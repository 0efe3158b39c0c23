//! Tests for field extraction

use super::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

fn site() -> Value {
    json!({
        "id": 12,
        "url": "https://netbox.example.com/api/dcim/sites/12/",
        "display": "DC1",
        "name": "DC1",
        "slug": "dc1",
        "status": {"value": "active", "label": "Active"},
        "region": {"id": 3, "name": "Europe", "slug": "europe"},
        "group": null,
        "tenant": {"id": 7, "slug": "acme", "name": "ACME Corp"},
        "facility": "",
        "time_zone": "Europe/Berlin",
        "latitude": 52.52,
        "asns": [{"id": 1, "asn": 65001, "display": "AS65001"}],
        "description": "Main\r\ndata   centre\n\n",
        "comments": "  first line\nsecond\tline  ",
        "tags": [
            {"id": 1, "name": "Core", "slug": "core"},
            {"id": 2, "name": "Prod", "slug": "prod"}
        ],
        "shared": false,
        "custom_fields": {"owner": "ops"}
    })
}

// ============================================================================
// Direct Attribute Tests
// ============================================================================

#[test_case("name", "DC1" ; "string")]
#[test_case("id", "12" ; "integer")]
#[test_case("latitude", "52.52" ; "float")]
#[test_case("shared", "false" ; "bool")]
#[test_case("facility", "" ; "empty string")]
#[test_case("group", "" ; "null")]
#[test_case("nonexistent", "" ; "missing")]
fn test_direct_attribute(field: &str, expected: &str) {
    assert_eq!(resolve_field(&site(), field), expected);
}

// ============================================================================
// Nested Object Tests
// ============================================================================

#[test_case("region", "Europe" ; "name preferred")]
#[test_case("tenant", "ACME Corp" ; "name over slug")]
#[test_case("status", "active" ; "choice value")]
#[test_case("region.slug", "europe" ; "dotted path")]
#[test_case("tenant.id", "7" ; "dotted id")]
#[test_case("status.label", "Active" ; "choice label")]
#[test_case("group.name", "" ; "null parent")]
#[test_case("region.missing", "" ; "missing child")]
#[test_case("name.length", "" ; "scalar parent")]
fn test_nested_object(field: &str, expected: &str) {
    assert_eq!(resolve_field(&site(), field), expected);
}

#[test]
fn test_nested_object_fallbacks() {
    assert_eq!(render_value(&json!({"slug": "only-slug", "id": 4})), "only-slug");
    assert_eq!(render_value(&json!({"id": 4, "url": "x"})), "4");
    assert_eq!(render_value(&json!({"name": null, "slug": "s"})), "s");
    assert_eq!(render_value(&json!({"label": "Planned"})), "Planned");
    assert_eq!(render_value(&json!({"owner": "ops"})), r#"{"owner":"ops"}"#);
}

// ============================================================================
// List Tests
// ============================================================================

#[test_case("tags", "core,prod" ; "tags by slug")]
#[test_case("tags.name", "Core,Prod" ; "tags by name")]
#[test_case("tags.id", "1,2" ; "tags by id")]
#[test_case("asns", "1" ; "objects without slug or name")]
#[test_case("asns.asn", "65001" ; "list attribute")]
fn test_list_join(field: &str, expected: &str) {
    assert_eq!(resolve_field(&site(), field), expected);
}

#[test]
fn test_list_edge_cases() {
    assert_eq!(render_value(&json!([])), "");
    assert_eq!(render_value(&json!(["a", 2, null, true])), "a,2,true");
    assert_eq!(render_value(&json!([{"name": "x"}, {"slug": "y"}])), "x,y");

    let record = json!({"vlans": [{"vid": 10}, {"vid": null}, {}, {"vid": 30}]});
    assert_eq!(resolve_field(&record, "vlans.vid"), "10,30");
}

#[test]
fn test_list_of_lists() {
    let record = json!({"a": [{"b": [{"slug": "x"}, {"slug": "y"}]}, {"b": [{"slug": "z"}]}]});
    assert_eq!(resolve_field(&record, "a.b"), "x,y,z");
    assert_eq!(resolve_field(&record, "a.b.slug"), "x,y,z");
}

// ============================================================================
// Normalization Tests
// ============================================================================

#[test_case("line 1\nline 2", "line 1 line 2" ; "newline")]
#[test_case("a\r\nb\rc", "a b c" ; "carriage returns")]
#[test_case("  a   b  ", "a b" ; "collapse and trim")]
#[test_case("tab\tseparated", "tab separated" ; "tabs")]
#[test_case("", "" ; "empty")]
#[test_case("\n\n", "" ; "only whitespace")]
fn test_normalize(input: &str, expected: &str) {
    assert_eq!(normalize(input), expected);
}

// ============================================================================
// Row Tests
// ============================================================================

#[test]
fn test_extract_row() {
    let columns: Vec<String> = [
        "name",
        "status",
        "region",
        "tenant.slug",
        "description",
        "comments",
        "tags",
        "group",
        "id",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();

    let row = extract_row(&site(), &columns);
    assert_eq!(
        row,
        vec![
            "DC1",
            "active",
            "Europe",
            "acme",
            "Main data centre",
            "first line second line",
            "core,prod",
            "",
            "12",
        ]
    );
}

#[test]
fn test_row_extractor_reuse() {
    let extractor = RowExtractor::new(&["name".to_string(), "id".to_string()]);
    assert_eq!(extractor.width(), 2);

    let rows: Vec<_> = [json!({"id": 1, "name": "a"}), json!({"id": 2})]
        .iter()
        .map(|r| extractor.extract(r))
        .collect();
    assert_eq!(rows, vec![vec!["a", "1"], vec!["", "2"]]);
}

#[test]
fn test_field_path_parse() {
    let path = FieldPath::parse("tenant.group.slug");
    assert_eq!(path.segments(), &["tenant", "group", "slug"]);
    assert_eq!(LIST_SEPARATOR, ",");
}
