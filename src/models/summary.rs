//! Import summary display model

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::{Formattable, json, table};

/// Response keys shown in the summary table, in display order
const SUMMARY_KEYS: [&str; 8] = [
    "test",
    "test_id",
    "engagement",
    "engagement_id",
    "product_id",
    "product_type_id",
    "scan_type",
    "statistics",
];

const SUMMARY_TITLE: &str = "DefectDojo Import Summary";

/// One key/value line of the summary table
#[derive(Debug, Clone, PartialEq, Eq, Tabled, Serialize)]
pub struct SummaryRow {
    #[tabled(rename = "KEY")]
    pub key: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl SummaryRow {
    fn new(key: &str, value: String) -> Self {
        Self {
            key: key.to_string(),
            value,
        }
    }
}

/// Result of an import or reimport, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    /// Raw response body from DefectDojo
    pub response: Value,

    /// Browser link to the created or updated test
    pub scan_url: Option<String>,

    #[serde(skip)]
    pub rows: Vec<SummaryRow>,
}

impl ImportSummary {
    pub fn from_response(response: Value, base_url: &str) -> Self {
        let mut rows: Vec<SummaryRow> = SUMMARY_KEYS
            .iter()
            .filter_map(|key| {
                response
                    .get(*key)
                    .map(|value| SummaryRow::new(key, render_value(value)))
            })
            .collect();

        let scan_url = test_id(&response)
            .map(|id| format!("{}/test/{}", base_url.trim_end_matches('/'), id));
        if let Some(url) = &scan_url {
            rows.push(SummaryRow::new("Scan URL", url.clone()));
        }

        Self {
            response,
            scan_url,
            rows,
        }
    }
}

/// Test ID from the shapes DefectDojo versions have returned:
/// `test.id`, a numeric `test`, `test_id`, or a top-level `id`.
pub fn test_id(response: &Value) -> Option<i64> {
    match response.get("test") {
        Some(Value::Object(test)) => test.get("id").and_then(as_id),
        Some(other) => as_id(other),
        None => None,
    }
    .or_else(|| response.get("test_id").and_then(as_id))
    .or_else(|| response.get("id").and_then(as_id))
}

fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Strings as-is, anything else as compact JSON
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Formattable for ImportSummary {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                SUMMARY_TITLE.bold(),
                table::format_table(&self.rows)
            )),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_follow_key_order() {
        let response = json!({
            "scan_type": "ZAP Scan",
            "engagement": 5,
            "test": 77,
            "unrelated": "ignored",
        });
        let summary = ImportSummary::from_response(response, "https://dojo.example");
        let keys: Vec<&str> = summary.rows.iter().map(|r| r.key.as_str()).collect();

        assert_eq!(keys, vec!["test", "engagement", "scan_type", "Scan URL"]);
        assert_eq!(
            summary.scan_url.as_deref(),
            Some("https://dojo.example/test/77")
        );
    }

    #[test]
    fn test_test_id_shapes() {
        assert_eq!(test_id(&json!({ "test": { "id": 3, "title": "x" } })), Some(3));
        assert_eq!(test_id(&json!({ "test": 4 })), Some(4));
        assert_eq!(test_id(&json!({ "test_id": "5" })), Some(5));
        assert_eq!(test_id(&json!({ "id": 6 })), Some(6));
        assert_eq!(test_id(&json!({ "test": 7, "id": 99 })), Some(7));
        assert_eq!(test_id(&json!({ "engagement": 1 })), None);
    }

    #[test]
    fn test_no_scan_url_without_test_id() {
        let summary = ImportSummary::from_response(json!({ "engagement": 1 }), "https://d");
        assert!(summary.scan_url.is_none());
        assert!(summary.rows.iter().all(|r| r.key != "Scan URL"));
    }

    #[test]
    fn test_statistics_rendered_as_json() {
        let response = json!({ "test": 1, "statistics": { "after": { "total": 2 } } });
        let summary = ImportSummary::from_response(response, "https://d/");
        let stats = summary.rows.iter().find(|r| r.key == "statistics").unwrap();

        assert_eq!(stats.value, r#"{"after":{"total":2}}"#);
        assert_eq!(summary.scan_url.as_deref(), Some("https://d/test/1"));
    }

    #[test]
    fn test_table_format_has_title_and_url() {
        let summary = ImportSummary::from_response(json!({ "test": 9 }), "https://dojo.example");
        let output = summary.format(OutputFormat::Table).unwrap();

        assert!(output.contains(SUMMARY_TITLE));
        assert!(output.contains("Scan URL"));
        assert!(output.contains("https://dojo.example/test/9"));
    }

    #[test]
    fn test_json_format_includes_response_and_url() {
        let summary = ImportSummary::from_response(json!({ "test": 9 }), "https://dojo.example");
        let output = summary.format(OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["data"]["response"]["test"], 9);
        assert_eq!(parsed["data"]["scan_url"], "https://dojo.example/test/9");
        assert!(parsed["data"].get("rows").is_none());
    }
}
