//! Scan type catalog resolution
//!
//! Sources are tried in a fixed order and the first one that yields a
//! non-empty enum wins. Failures never abort resolution: when every
//! requested source is unavailable the built-in list is returned, flagged
//! with `is_fallback`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::OnceCell;

use super::extract::scan_type_enum;
use super::{ScanTypeCatalog, ScanTypeSource};
use crate::client::SchemaApi;
use crate::error::{ConfigError, Result, ScanTypeError, SourceUnavailable};

/// Schema endpoints probed on the server, in priority order
pub const SCHEMA_ENDPOINTS: [&str; 3] = [
    "/api/v2/oa3/openapi.json",
    "/api/v2/oa3/swagger.json",
    "/api/v2/schema/?format=openapi",
];

/// How many labels a validation error lists
const SUGGESTION_SAMPLE: usize = 12;

/// One way of loading labels
#[derive(Debug, Clone, Copy)]
enum Strategy<'a> {
    Server,
    File(&'a Path),
}

impl Strategy<'_> {
    fn source(&self) -> ScanTypeSource {
        match self {
            Strategy::Server => ScanTypeSource::Server,
            Strategy::File(_) => ScanTypeSource::File,
        }
    }
}

/// Resolves and caches the scan type catalog for one invocation.
pub struct ScanTypeRegistry {
    schema_api: Option<Arc<dyn SchemaApi>>,
    spec_path: Option<PathBuf>,
    cached: OnceCell<ScanTypeCatalog>,
}

impl ScanTypeRegistry {
    /// `schema_api` is `None` when no server is configured; `spec_path` is
    /// the local OpenAPI file, if any.
    pub fn new(schema_api: Option<Arc<dyn SchemaApi>>, spec_path: Option<PathBuf>) -> Self {
        Self {
            schema_api,
            spec_path,
            cached: OnceCell::new(),
        }
    }

    /// Resolve once and reuse the result for the rest of the process.
    pub async fn catalog(&self, source: ScanTypeSource) -> Result<&ScanTypeCatalog> {
        self.cached.get_or_try_init(|| self.resolve(source)).await
    }

    /// Resolve a fresh catalog from `source`.
    ///
    /// Only fails when `File` is requested without a spec path.
    pub async fn resolve(&self, source: ScanTypeSource) -> Result<ScanTypeCatalog> {
        let strategies = self.plan(source)?;

        for strategy in strategies {
            match self.load(strategy).await {
                Ok(labels) => {
                    let catalog = ScanTypeCatalog::new(labels, strategy.source());
                    info!(
                        "Loaded {} scan types from {}",
                        catalog.len(),
                        catalog.source()
                    );
                    return Ok(catalog);
                }
                Err(e) => debug!("Scan type source {} unavailable: {}", strategy.source(), e),
            }
        }

        info!("Using built-in scan type list (requested source: {})", source);
        Ok(ScanTypeCatalog::fallback(source))
    }

    fn plan(&self, source: ScanTypeSource) -> Result<Vec<Strategy<'_>>> {
        let file = self.spec_path.as_deref().map(Strategy::File);

        Ok(match source {
            ScanTypeSource::Auto => std::iter::once(Strategy::Server).chain(file).collect(),
            ScanTypeSource::Server => vec![Strategy::Server],
            ScanTypeSource::File => vec![file.ok_or(ConfigError::MissingSpecPath)?],
        })
    }

    async fn load(&self, strategy: Strategy<'_>) -> std::result::Result<Vec<String>, SourceUnavailable> {
        match strategy {
            Strategy::Server => self.load_from_server().await,
            Strategy::File(path) => load_from_file(path).await,
        }
    }

    /// Probe each schema endpoint in order, stopping at the first usable one.
    async fn load_from_server(&self) -> std::result::Result<Vec<String>, SourceUnavailable> {
        let api = self.schema_api.as_ref().ok_or(SourceUnavailable::NoServer)?;

        let mut last_error = SourceUnavailable::NoServer;
        for path in SCHEMA_ENDPOINTS {
            let attempt = match api.fetch_schema(path).await {
                Ok(doc) => non_empty(scan_type_enum(&doc)),
                Err(e) => Err(e),
            };

            match attempt {
                Ok(labels) => return Ok(labels),
                Err(e) => {
                    debug!("Schema probe {} failed: {}", path, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

/// Read a local OpenAPI JSON file and extract its enum.
async fn load_from_file(path: &Path) -> std::result::Result<Vec<String>, SourceUnavailable> {
    if !path.exists() {
        return Err(SourceUnavailable::MissingFile(path.to_path_buf()));
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SourceUnavailable::Read(e.to_string()))?;
    let doc: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| SourceUnavailable::Malformed(e.to_string()))?;

    non_empty(scan_type_enum(&doc))
}

fn non_empty(labels: Vec<String>) -> std::result::Result<Vec<String>, SourceUnavailable> {
    if labels.is_empty() {
        Err(SourceUnavailable::EmptyEnum)
    } else {
        Ok(labels)
    }
}

/// Exact, case-sensitive membership of `label` in `catalog`.
pub fn validate(label: &str, catalog: &ScanTypeCatalog) -> bool {
    catalog.validate(label)
}

/// Like [`validate`], but produces the user-facing error on failure.
pub fn ensure_valid(label: &str, catalog: &ScanTypeCatalog) -> Result<()> {
    if validate(label, catalog) {
        return Ok(());
    }

    // Closest labels first, or the head of the catalog when nothing matches
    let mut sample = catalog.suggest(label);
    if sample.is_empty() {
        sample = catalog.labels().iter().map(String::as_str).collect();
    }
    sample.truncate(SUGGESTION_SAMPLE);

    let source_name = if catalog.is_fallback() {
        format!("{} (built-in list)", catalog.source())
    } else {
        catalog.source().to_string()
    };

    Err(ScanTypeError::Invalid {
        label: label.to_string(),
        count: catalog.len(),
        source_name,
        sample: sample.join(", "),
    }
    .into())
}
