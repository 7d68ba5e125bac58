//! Scan upload operations

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::{ImportScanRequest, ReimportScanRequest};
use crate::error::Result;

/// Upload scan result files. Responses are returned as raw JSON because
/// their shape varies between DefectDojo versions.
#[async_trait]
pub trait ImportApi: Send + Sync {
    /// Import a scan, creating a new test
    async fn import_scan(&self, request: &ImportScanRequest) -> Result<Value>;

    /// Reimport a scan into an existing test
    async fn reimport_scan(&self, request: &ReimportScanRequest) -> Result<Value>;
}
