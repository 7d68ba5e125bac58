//! Engagement models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Engagement resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    /// Owning product ID
    pub product: i64,
}

impl Engagement {
    /// Name shown in pickers; unnamed engagements fall back to their ID.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Engagement {}", self.id),
        }
    }
}

/// Body for `POST /api/v2/engagements/`
#[derive(Debug, Clone, Serialize)]
pub struct NewEngagement {
    pub product: i64,
    pub name: String,
    pub target_start: NaiveDate,
    pub target_end: NaiveDate,
    pub engagement_type: String,
    pub status: String,
}

impl NewEngagement {
    /// A CI/CD engagement in progress from `start` to `end`.
    pub fn ci_cd(product: i64, name: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            product,
            name: name.to_string(),
            target_start: start,
            target_end: end,
            engagement_type: "CI/CD".to_string(),
            status: "In Progress".to_string(),
        }
    }
}
