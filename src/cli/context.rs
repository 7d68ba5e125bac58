//! Command execution context
//!
//! Loads the config file, merges it with command-line values, connects the
//! API client and wires the scan type registry to it.

use std::io::IsTerminal;
use std::sync::Arc;

use colored::Colorize;
use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{DefectDojoClient, SchemaApi};
use crate::config::{Config, Settings};
use crate::error::{ConfigError, Result};
use crate::output::progress;
use crate::scan_types::{ScanTypeCatalog, ScanTypeRegistry};

/// Context for command execution containing settings, client, and runtime options.
pub struct CommandContext {
    /// Merged settings for this invocation
    pub settings: Settings,
    /// Connected API client, absent when no base URL is configured
    client: Option<Arc<DefectDojoClient>>,
    /// Scan type catalog, resolved at most once
    pub registry: ScanTypeRegistry,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Connecting exchanges username/password for a token when no token is
    /// given. Without a base URL the context has no client and the registry
    /// only sees the local spec file and the built-in list.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded, the URL is malformed, or the
    /// credential exchange is rejected.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let settings = Settings::resolve(opts.overrides.clone(), config);
        debug!("Resolved settings: {:?}", settings);

        let client = match settings.url {
            Some(_) => {
                let auth = settings.auth()?;
                Some(Arc::new(
                    DefectDojoClient::connect(&auth, settings.timeout).await?,
                ))
            }
            None => None,
        };

        let schema_api = client
            .clone()
            .map(|client| client as Arc<dyn SchemaApi>);
        let registry = ScanTypeRegistry::new(schema_api, settings.api_spec.clone());

        Ok(Self {
            settings,
            client,
            registry,
            format: opts.format,
        })
    }

    /// The API client, for commands that talk to DefectDojo.
    pub fn client(&self) -> Result<Arc<DefectDojoClient>> {
        self.client
            .clone()
            .ok_or_else(|| ConfigError::MissingUrl.into())
    }

    /// Resolve the scan type catalog, noting on stderr when the built-in list is used.
    pub async fn scan_types(&self) -> Result<&ScanTypeCatalog> {
        let spinner = progress::spinner("Loading scan types...", self.show_progress());
        let catalog = self
            .registry
            .catalog(self.settings.scan_types_source)
            .await;
        spinner.finish_and_clear();

        let catalog = catalog?;
        if catalog.is_fallback() {
            eprintln!(
                "{}",
                format!(
                    "Could not load scan types from the {} source; using the built-in list of {}.",
                    catalog.source(),
                    catalog.len()
                )
                .yellow()
            );
        }
        Ok(catalog)
    }

    /// Spinners only for table output on a terminal
    pub fn show_progress(&self) -> bool {
        self.format == OutputFormat::Table && std::io::stderr().is_terminal()
    }
}
