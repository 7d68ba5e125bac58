//! Product models

use serde::{Deserialize, Serialize};

/// Product resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
}

/// Body for `POST /api/v2/products/`
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,

    pub description: String,

    /// Product type ID; the server default applies when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod_type: Option<i64>,
}

impl NewProduct {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: name.to_string(),
            prod_type: None,
        }
    }
}
