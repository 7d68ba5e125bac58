//! DefectDojo API client implementation

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{AuthApi, CatalogApi, ImportApi, SchemaApi};
use super::models::{
    AuthContext, Credentials, Engagement, ImportScanRequest, Listing, NewEngagement, NewProduct,
    Product, ReimportScanRequest, Test,
};
use crate::error::{ApiError, Result, SourceUnavailable};

/// Default timeout for API requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for a single schema probe
pub const SCHEMA_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Page size for list endpoints
const LIST_LIMIT: u32 = 100;

/// DefectDojo API client
pub struct DefectDojoClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl DefectDojoClient {
    /// Create an unauthenticated client for `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("ddcli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout,
        })
    }

    /// Per-probe timeout: the client timeout, capped at [`SCHEMA_PROBE_TIMEOUT`]
    fn probe_timeout(&self) -> Duration {
        self.timeout.min(SCHEMA_PROBE_TIMEOUT)
    }

    /// Create a client and authenticate it from `auth`.
    ///
    /// Username/password credentials cost one extra request to obtain a token.
    pub async fn connect(auth: &AuthContext, timeout: Duration) -> Result<Self> {
        let mut client = Self::new(&auth.base_url, timeout)?;

        match &auth.credentials {
            Credentials::Token(token) => client.token = Some(token.clone()),
            Credentials::Password { username, password } => {
                let token = client.exchange_credentials(username, password).await?;
                client.token = Some(token);
            }
            Credentials::Anonymous => {
                debug!("No DefectDojo credentials configured; sending unauthenticated requests");
            }
        }

        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Token {}", token)),
            None => builder,
        }
    }

    /// Send a request and decode a successful JSON body
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            status if status.is_success() => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        debug!("GET {}", path);
        let listing: Listing<T> = self.send(self.http.get(self.url(path)).query(query)).await?;
        Ok(listing.into_items())
    }

    async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("POST {}", path);
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    async fn post_scan(
        &self,
        path: &str,
        fields: Vec<(&'static str, String)>,
        file: &Path,
    ) -> Result<Value> {
        let form = scan_form(fields, file).await?;
        debug!("POST {} ({})", path, file.display());
        self.send(self.http.post(self.url(path)).multipart(form))
            .await
    }
}

/// Multipart form with the text fields and the scan file, read once
async fn scan_form(fields: Vec<(&'static str, String)>, file: &Path) -> Result<Form> {
    let bytes = tokio::fs::read(file).await?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scan".to_string());

    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    Ok(form.part("file", Part::bytes(bytes).file_name(file_name)))
}

#[async_trait]
impl AuthApi for DefectDojoClient {
    async fn exchange_credentials(&self, username: &str, password: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct TokenResponse {
            token: String,
        }

        debug!("POST /api/v2/api-token-auth/ for user {}", username);
        let request = self
            .http
            .post(self.url("/api/v2/api-token-auth/"))
            .form(&[("username", username), ("password", password)]);

        // Bad credentials come back as a 400 from the token endpoint
        let response: TokenResponse = self.send(request).await.map_err(|e| match e {
            crate::error::Error::Api(ApiError::BadRequest(_)) => ApiError::Unauthorized.into(),
            other => other,
        })?;

        Ok(response.token)
    }
}

#[async_trait]
impl CatalogApi for DefectDojoClient {
    async fn list_products(&self, name_query: Option<&str>) -> Result<Vec<Product>> {
        let mut query = vec![("limit", LIST_LIMIT.to_string())];
        if let Some(name) = name_query {
            query.push(("name", name.to_string()));
        }

        let products: Vec<Product> = self.get_list("/api/v2/products/", &query).await?;

        // The name filter is exact on some server versions; narrow client-side as well
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
        self.post_json("/api/v2/products/", product).await
    }

    async fn list_engagements(&self, product_id: i64) -> Result<Vec<Engagement>> {
        let query = [
            ("product", product_id.to_string()),
            ("limit", LIST_LIMIT.to_string()),
        ];
        self.get_list("/api/v2/engagements/", &query).await
    }

    async fn create_engagement(&self, engagement: &NewEngagement) -> Result<Engagement> {
        self.post_json("/api/v2/engagements/", engagement).await
    }

    async fn list_tests(&self, engagement_id: i64) -> Result<Vec<Test>> {
        let query = [
            ("engagement", engagement_id.to_string()),
            ("limit", LIST_LIMIT.to_string()),
        ];
        self.get_list("/api/v2/tests/", &query).await
    }
}

#[async_trait]
impl ImportApi for DefectDojoClient {
    async fn import_scan(&self, request: &ImportScanRequest) -> Result<Value> {
        self.post_scan("/api/v2/import-scan/", request.form_fields(), &request.file)
            .await
    }

    async fn reimport_scan(&self, request: &ReimportScanRequest) -> Result<Value> {
        self.post_scan(
            "/api/v2/reimport-scan/",
            request.form_fields(),
            &request.file,
        )
        .await
    }
}

#[async_trait]
impl SchemaApi for DefectDojoClient {
    async fn fetch_schema(&self, path: &str) -> std::result::Result<Value, SourceUnavailable> {
        debug!("Probing schema at {}", path);
        let response = self
            .authorized(self.http.get(self.url(path)))
            .timeout(self.probe_timeout())
            .send()
            .await
            .map_err(|e| SourceUnavailable::from(ApiError::from(e)))?;

        if response.status() != StatusCode::OK {
            return Err(SourceUnavailable::Status(response.status().as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SourceUnavailable::Malformed(e.to_string()))
    }
}
