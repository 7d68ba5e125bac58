//! Scan type catalog display model

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::{Formattable, json, table};
use crate::scan_types::{MatchRank, ScanTypeCatalog, ScanTypeSource, matcher};

/// Scan type display row for table/JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Tabled, Serialize)]
pub struct ScanTypeRow {
    #[tabled(rename = "#")]
    #[serde(skip)]
    pub position: usize,

    #[tabled(rename = "SCAN TYPE")]
    pub label: String,

    #[tabled(rename = "MATCH")]
    #[serde(skip)]
    pub match_kind: String,

    /// Match rank when listing results for a query
    #[tabled(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<MatchRank>,
}

impl ScanTypeRow {
    fn new(position: usize, label: &str, rank: Option<MatchRank>) -> Self {
        Self {
            position,
            label: label.to_string(),
            match_kind: rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
            rank,
        }
    }
}

/// A catalog, or the matches within it for a query
#[derive(Debug, Clone, Serialize)]
pub struct ScanTypeListing {
    pub source: ScanTypeSource,
    pub is_fallback: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    pub scan_types: Vec<ScanTypeRow>,
}

impl ScanTypeListing {
    /// Every label when `query` is `None`, otherwise the ranked matches.
    pub fn new(catalog: &ScanTypeCatalog, query: Option<&str>) -> Self {
        let scan_types = match query {
            Some(query) => matcher::ranked(query, catalog.labels())
                .into_iter()
                .enumerate()
                .map(|(i, m)| ScanTypeRow::new(i + 1, m.label, Some(m.rank)))
                .collect(),
            None => catalog
                .labels()
                .iter()
                .enumerate()
                .map(|(i, label)| ScanTypeRow::new(i + 1, label, None))
                .collect(),
        };

        Self {
            source: catalog.source(),
            is_fallback: catalog.is_fallback(),
            query: query.map(str::to_string),
            scan_types,
        }
    }

    fn heading(&self) -> String {
        let origin = if self.is_fallback {
            "built-in list".to_string()
        } else {
            self.source.to_string()
        };

        match &self.query {
            Some(query) => format!(
                "{} matches for '{}' ({})",
                self.scan_types.len(),
                query,
                origin
            ),
            None => format!("{} scan types ({})", self.scan_types.len(), origin),
        }
    }
}

impl Formattable for ScanTypeListing {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                self.heading().bold(),
                table::format_table(&self.scan_types)
            )),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}
