//! Authentication API trait

use async_trait::async_trait;

use crate::error::Result;

/// Authentication operations for the DefectDojo API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a username and password for an API token
    async fn exchange_credentials(&self, username: &str, password: &str) -> Result<String>;
}
