//! Product, engagement and test operations

use async_trait::async_trait;

use crate::client::models::{Engagement, NewEngagement, NewProduct, Product, Test};
use crate::error::Result;

/// Browse and create the resources an import is filed under
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// List products, optionally filtered by a case-insensitive name substring
    async fn list_products(&self, name_query: Option<&str>) -> Result<Vec<Product>>;

    async fn create_product(&self, product: &NewProduct) -> Result<Product>;

    /// List engagements belonging to a product
    async fn list_engagements(&self, product_id: i64) -> Result<Vec<Engagement>>;

    async fn create_engagement(&self, engagement: &NewEngagement) -> Result<Engagement>;

    /// List tests belonging to an engagement
    async fn list_tests(&self, engagement_id: i64) -> Result<Vec<Test>>;
}
