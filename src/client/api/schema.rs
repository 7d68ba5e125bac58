//! OpenAPI schema probing

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SourceUnavailable;

/// Fetch OpenAPI documents published by the server
#[async_trait]
pub trait SchemaApi: Send + Sync {
    /// GET one schema endpoint. Anything but a 200 with a JSON body is a failure.
    async fn fetch_schema(&self, path: &str) -> std::result::Result<Value, SourceUnavailable>;
}
