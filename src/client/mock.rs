//! Mock DefectDojo API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::api::{AuthApi, CatalogApi, ImportApi, SchemaApi};
use super::models::{
    Engagement, ImportScanRequest, NewEngagement, NewProduct, Product, ReimportScanRequest, Test,
};
use crate::error::{ApiError, Result, SourceUnavailable};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockDojoClient::new()
///     .with_schema("/api/v2/oa3/openapi.json", doc)
///     .await;
///
/// let doc = mock.fetch_schema("/api/v2/oa3/openapi.json").await?;
/// ```
#[derive(Default)]
pub struct MockDojoClient {
    /// Schema documents keyed by endpoint path; missing paths answer 404
    schemas: Arc<Mutex<HashMap<String, Value>>>,
    products: Arc<Mutex<Vec<Product>>>,
    engagements: Arc<Mutex<Vec<Engagement>>>,
    tests: Arc<Mutex<Vec<Test>>>,
    /// Body returned from import/reimport
    import_response: Arc<Mutex<Option<Value>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Schema paths in the order they were probed
    probed: Arc<Mutex<Vec<String>>>,
    /// Captured uploads for test assertions
    uploads: Arc<Mutex<Vec<CapturedUpload>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub exchange_credentials: usize,
    pub list_products: usize,
    pub create_product: usize,
    pub list_engagements: usize,
    pub create_engagement: usize,
    pub list_tests: usize,
    pub import_scan: usize,
    pub reimport_scan: usize,
    pub fetch_schema: usize,
}

/// A captured upload for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedUpload {
    Import(ImportScanRequest),
    Reimport(ReimportScanRequest),
}

impl MockDojoClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `doc` from a schema endpoint.
    pub async fn with_schema(self, path: &str, doc: Value) -> Self {
        self.schemas.lock().await.insert(path.to_string(), doc);
        self
    }

    pub async fn with_products(self, products: Vec<Product>) -> Self {
        *self.products.lock().await = products;
        self
    }

    pub async fn with_engagements(self, engagements: Vec<Engagement>) -> Self {
        *self.engagements.lock().await = engagements;
        self
    }

    pub async fn with_tests(self, tests: Vec<Test>) -> Self {
        *self.tests.lock().await = tests;
        self
    }

    /// Configure the body returned from import and reimport.
    pub async fn with_import_response(self, response: Value) -> Self {
        *self.import_response.lock().await = Some(response);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Schema paths probed so far, in order.
    pub async fn probed_paths(&self) -> Vec<String> {
        self.probed.lock().await.clone()
    }

    pub async fn uploads(&self) -> Vec<CapturedUpload> {
        self.uploads.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn upload_response(&self) -> Value {
        self.import_response
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| json!({ "test": 1, "engagement": 1 }))
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockDojoClient {
    async fn exchange_credentials(&self, _username: &str, _password: &str) -> Result<String> {
        self.check_error().await?;
        self.call_count.lock().await.exchange_credentials += 1;
        Ok("mock-token".to_string())
    }
}

// ============================================================================
// CatalogApi Implementation
// ============================================================================

#[async_trait]
impl CatalogApi for MockDojoClient {
    async fn list_products(&self, name_query: Option<&str>) -> Result<Vec<Product>> {
        self.check_error().await?;
        self.call_count.lock().await.list_products += 1;

        let products = self.products.lock().await.clone();
        Ok(match name_query {
            Some(name) => {
                let needle = name.to_lowercase();
                products
                    .into_iter()
                    .filter(|p| p.name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => products,
        })
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        self.check_error().await?;
        self.call_count.lock().await.create_product += 1;

        let mut products = self.products.lock().await;
        let created = Product {
            id: products.len() as i64 + 1,
            name: product.name.clone(),
        };
        products.push(created.clone());
        Ok(created)
    }

    async fn list_engagements(&self, product_id: i64) -> Result<Vec<Engagement>> {
        self.check_error().await?;
        self.call_count.lock().await.list_engagements += 1;

        Ok(self
            .engagements
            .lock()
            .await
            .iter()
            .filter(|e| e.product == product_id)
            .cloned()
            .collect())
    }

    async fn create_engagement(&self, engagement: &NewEngagement) -> Result<Engagement> {
        self.check_error().await?;
        self.call_count.lock().await.create_engagement += 1;

        let mut engagements = self.engagements.lock().await;
        let created = Engagement {
            id: engagements.len() as i64 + 1,
            name: Some(engagement.name.clone()),
            product: engagement.product,
        };
        engagements.push(created.clone());
        Ok(created)
    }

    async fn list_tests(&self, engagement_id: i64) -> Result<Vec<Test>> {
        self.check_error().await?;
        self.call_count.lock().await.list_tests += 1;

        Ok(self
            .tests
            .lock()
            .await
            .iter()
            .filter(|t| t.engagement == engagement_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// ImportApi Implementation
// ============================================================================

#[async_trait]
impl ImportApi for MockDojoClient {
    async fn import_scan(&self, request: &ImportScanRequest) -> Result<Value> {
        self.check_error().await?;
        self.call_count.lock().await.import_scan += 1;
        self.uploads
            .lock()
            .await
            .push(CapturedUpload::Import(request.clone()));
        Ok(self.upload_response().await)
    }

    async fn reimport_scan(&self, request: &ReimportScanRequest) -> Result<Value> {
        self.check_error().await?;
        self.call_count.lock().await.reimport_scan += 1;
        self.uploads
            .lock()
            .await
            .push(CapturedUpload::Reimport(request.clone()));
        Ok(self.upload_response().await)
    }
}

// ============================================================================
// SchemaApi Implementation
// ============================================================================

#[async_trait]
impl SchemaApi for MockDojoClient {
    async fn fetch_schema(&self, path: &str) -> std::result::Result<Value, SourceUnavailable> {
        self.call_count.lock().await.fetch_schema += 1;
        self.probed.lock().await.push(path.to_string());

        if let Some(err) = self.error.lock().await.take() {
            return Err(err.into());
        }

        self.schemas
            .lock()
            .await
            .get(path)
            .cloned()
            .ok_or(SourceUnavailable::Status(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockDojoClient::new()
            .with_error(ApiError::Forbidden)
            .await;

        assert!(mock.list_products(None).await.is_err());
        assert!(mock.list_products(None).await.is_ok());
        assert_eq!(mock.call_counts().await.list_products, 1);
    }

    #[tokio::test]
    async fn test_mock_unknown_schema_path_is_404() {
        let mock = MockDojoClient::new();
        let err = mock.fetch_schema("/missing").await.unwrap_err();
        assert!(matches!(err, SourceUnavailable::Status(404)));
        assert_eq!(mock.probed_paths().await, vec!["/missing"]);
    }

    #[tokio::test]
    async fn test_mock_catalog_filters_by_parent() {
        let mock = MockDojoClient::new()
            .with_products(vec![
                Product { id: 1, name: "Web Shop".to_string() },
                Product { id: 2, name: "Billing".to_string() },
            ])
            .await
            .with_engagements(vec![
                Engagement { id: 10, name: Some("CI".to_string()), product: 1 },
                Engagement { id: 11, name: None, product: 2 },
            ])
            .await
            .with_tests(vec![Test { id: 100, title: None, engagement: 10 }])
            .await;

        let shops = mock.list_products(Some("shop")).await.unwrap();
        assert_eq!(shops.len(), 1);
        assert_eq!(mock.list_engagements(1).await.unwrap()[0].id, 10);
        assert_eq!(mock.list_tests(10).await.unwrap().len(), 1);
        assert!(mock.list_tests(11).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_create_engagement_is_listed() {
        let mock = MockDojoClient::new();
        let today = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let created = mock
            .create_engagement(&NewEngagement::ci_cd(3, "Nightly", today, today))
            .await
            .unwrap();

        assert_eq!(mock.list_engagements(3).await.unwrap(), vec![created]);
        assert_eq!(mock.call_counts().await.create_engagement, 1);
    }
}
