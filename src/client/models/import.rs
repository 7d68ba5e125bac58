//! Import and reimport request models

use std::fmt;
use std::path::PathBuf;

/// Lowest finding severity DefectDojo keeps from an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Severity {
    #[default]
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "Info",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(name)
    }
}

/// Where a new import lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
    /// An existing engagement; DefectDojo creates a new test in it
    Engagement(i64),
    /// Product and engagement looked up (or created) by name
    Named {
        product_name: String,
        engagement_name: String,
        auto_create_context: bool,
    },
}

/// Multipart fields for `POST /api/v2/import-scan/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportScanRequest {
    pub scan_type: String,
    pub file: PathBuf,
    pub target: ImportTarget,
    pub minimum_severity: Severity,
    pub test_title: Option<String>,
    pub deduplication_on_engagement: Option<bool>,
    pub active: Option<bool>,
    pub verified: Option<bool>,
}

impl ImportScanRequest {
    /// Import into an existing engagement with server defaults for everything else.
    pub fn into_engagement(engagement_id: i64, scan_type: &str, file: PathBuf) -> Self {
        Self {
            scan_type: scan_type.to_string(),
            file,
            target: ImportTarget::Engagement(engagement_id),
            minimum_severity: Severity::default(),
            test_title: None,
            deduplication_on_engagement: None,
            active: None,
            verified: None,
        }
    }

    /// Text fields of the form, in submission order. The file part is added separately.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("scan_type", self.scan_type.clone()),
            ("minimum_severity", self.minimum_severity.to_string()),
        ];

        match &self.target {
            ImportTarget::Engagement(id) => fields.push(("engagement", id.to_string())),
            ImportTarget::Named {
                product_name,
                engagement_name,
                auto_create_context,
            } => {
                fields.push(("product_name", product_name.clone()));
                fields.push(("engagement_name", engagement_name.clone()));
                if *auto_create_context {
                    fields.push(("auto_create_context", "true".to_string()));
                }
            }
        }

        push_flag(
            &mut fields,
            "deduplication_on_engagement",
            self.deduplication_on_engagement,
        );
        if let Some(title) = &self.test_title {
            fields.push(("test_title", title.clone()));
        }
        push_flag(&mut fields, "active", self.active);
        push_flag(&mut fields, "verified", self.verified);

        fields
    }
}

/// Multipart fields for `POST /api/v2/reimport-scan/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReimportScanRequest {
    pub scan_type: String,
    pub file: PathBuf,
    pub test_id: i64,
    pub minimum_severity: Severity,
    pub active: Option<bool>,
    pub verified: Option<bool>,
}

impl ReimportScanRequest {
    pub fn into_test(test_id: i64, scan_type: &str, file: PathBuf) -> Self {
        Self {
            scan_type: scan_type.to_string(),
            file,
            test_id,
            minimum_severity: Severity::default(),
            active: None,
            verified: None,
        }
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("scan_type", self.scan_type.clone()),
            ("test", self.test_id.to_string()),
            ("minimum_severity", self.minimum_severity.to_string()),
        ];
        push_flag(&mut fields, "active", self.active);
        push_flag(&mut fields, "verified", self.verified);
        fields
    }
}

/// Booleans go over the wire as "true"/"false", and only when set.
fn push_flag(fields: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<bool>) {
    if let Some(value) = value {
        fields.push((name, value.to_string()));
    }
}
