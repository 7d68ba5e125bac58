//! Configuration management for ddcli
//!
//! Settings are layered: CLI flag > environment variable > config file >
//! built-in default. Clap resolves the first two layers; this module owns
//! the optional YAML file and the merge.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::defectdojo::DEFAULT_TIMEOUT;
use crate::client::models::AuthContext;
use crate::error::{ConfigError, Result};
use crate::scan_types::ScanTypeSource;

/// Contents of `~/.ddcli/config.yaml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// DefectDojo base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Username for token exchange (the password is never read from file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Local OpenAPI JSON file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_spec: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_types_source: Option<ScanTypeSource>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_scan_type: Option<bool>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".ddcli").join("config.yaml"))
    }

    /// Load from an explicit path, or from the default path if `None`.
    ///
    /// A missing default file yields an empty config; a missing explicit
    /// file is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }
}

/// Values supplied on the command line or through the environment.
///
/// Holds secrets, so it has no `Debug` implementation.
#[derive(Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_spec: Option<PathBuf>,
    pub scan_types_source: Option<ScanTypeSource>,
    pub validate_scan_type: Option<bool>,
}

/// Fully resolved settings for one invocation
#[derive(Clone)]
pub struct Settings {
    pub url: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_spec: Option<PathBuf>,
    pub scan_types_source: ScanTypeSource,
    pub validate_scan_type: bool,
    pub timeout: Duration,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_spec", &self.api_spec)
            .field("scan_types_source", &self.scan_types_source)
            .field("validate_scan_type", &self.validate_scan_type)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Settings {
    /// Merge overrides over the config file, then defaults.
    pub fn resolve(overrides: Overrides, config: Config) -> Self {
        Self {
            url: overrides.url.or(config.url),
            token: overrides.token.or(config.token),
            username: overrides.username.or(config.username),
            password: overrides.password,
            api_spec: overrides.api_spec.or(config.api_spec),
            scan_types_source: overrides
                .scan_types_source
                .or(config.scan_types_source)
                .unwrap_or_default(),
            validate_scan_type: overrides
                .validate_scan_type
                .or(config.validate_scan_type)
                .unwrap_or(true),
            timeout: config
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// Authentication context, requiring a base URL.
    pub fn auth(&self) -> Result<AuthContext> {
        let url = self
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingUrl)?;

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "Base URL must start with http:// or https://, got '{}'",
                url
            ))
            .into());
        }

        Ok(AuthContext::new(
            url,
            self.token.clone(),
            self.username.clone(),
            self.password.clone(),
        ))
    }
}
