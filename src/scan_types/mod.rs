//! Scan type resolution and matching
//!
//! DefectDojo only accepts imports whose `scan_type` is one of the labels in
//! its importer enum. This module discovers that enum and helps users pick
//! from it:
//! - [`registry`] - resolves a [`ScanTypeCatalog`] from the server, a local
//!   OpenAPI file, or the built-in fallback list
//! - [`extract`] - pulls the `scan_type` enum out of an OpenAPI/Swagger document
//! - [`matcher`] - ranks labels against partial input for autocomplete

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod extract;
pub mod matcher;
pub mod registry;

pub use matcher::{MatchCycle, MatchRank};
pub use registry::ScanTypeRegistry;

/// Labels used when neither the server nor a local spec yields a catalog.
pub const FALLBACK_SCAN_TYPES: [&str; 8] = [
    "ZAP Scan",
    "Trivy Scan",
    "Checkov Scan",
    "Dependency Check Scan",
    "Burp Scan",
    "Snyk Scan",
    "SonarQube Scan",
    "Anchore Grype",
];

/// Where scan type labels are loaded from
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ScanTypeSource {
    /// Server, then local spec file, then the built-in list
    #[default]
    Auto,
    /// Live OpenAPI schema from the DefectDojo server
    Server,
    /// Local OpenAPI JSON file
    File,
}

impl fmt::Display for ScanTypeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanTypeSource::Auto => "auto",
            ScanTypeSource::Server => "server",
            ScanTypeSource::File => "file",
        };
        f.write_str(name)
    }
}

/// Ordered, de-duplicated set of scan type labels.
///
/// Order is the order the source listed them in and drives default
/// selection in the matcher. A catalog is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanTypeCatalog {
    labels: Vec<String>,
    source: ScanTypeSource,
    is_fallback: bool,
}

impl ScanTypeCatalog {
    /// Build a catalog from labels, dropping duplicates after their first occurrence.
    pub fn new<I, S>(labels: I, source: ScanTypeSource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }

        Self {
            labels: unique,
            source,
            is_fallback: false,
        }
    }

    /// The built-in list, tagged with the source that was requested.
    pub fn fallback(requested: ScanTypeSource) -> Self {
        Self {
            is_fallback: true,
            ..Self::new(FALLBACK_SCAN_TYPES, requested)
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn source(&self) -> ScanTypeSource {
        self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Exact, case-sensitive membership test.
    pub fn validate(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Ranked matches for `query`, best first.
    pub fn suggest(&self, query: &str) -> Vec<&str> {
        matcher::suggest(query, &self.labels)
    }
}
