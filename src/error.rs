//! Error types for the ddcli CLI

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for ddcli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ScanType(#[from] ScanTypeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Errors reported by the DefectDojo API.
///
/// Bodies returned by the server are carried verbatim so the user sees
/// exactly what DefectDojo rejected.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "Authentication failed. Check --token/DOJO_TOKEN or --username/--password (DOJO_USERNAME/DOJO_PASSWORD)."
    )]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to DefectDojo".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Base URL is required. Pass --url or set DOJO_URL.")]
    MissingUrl,

    #[error(
        "Scan type source 'file' needs an OpenAPI spec. Pass --api-spec or set DOJO_API_SPEC."
    )]
    MissingSpecPath,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Scan type validation failures surfaced to the user
#[derive(Debug, Error)]
pub enum ScanTypeError {
    #[error(
        "Invalid scan type '{label}'. Found {count} values from {source_name}. Try one of: {sample}...\n\
         Use --no-validate-scan-type to skip validation, or run `ddcli scan-types` to list available types."
    )]
    Invalid {
        label: String,
        count: usize,
        source_name: String,
        sample: String,
    },
}

/// Reasons a single scan type source could not produce a catalog.
///
/// These never reach the user directly; the registry logs them and moves on
/// to the next source.
#[derive(Debug, Error)]
pub enum SourceUnavailable {
    #[error("no DefectDojo server configured")]
    NoServer,

    #[error("request failed: {0}")]
    Network(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("no scan_type enum in document")]
    EmptyEnum,

    #[error("spec file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to read spec file: {0}")]
    Read(String),
}

impl From<ApiError> for SourceUnavailable {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidResponse(msg) => SourceUnavailable::Malformed(msg),
            other => SourceUnavailable::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("DOJO_TOKEN"));
    }

    #[test]
    fn test_api_error_bad_request_is_verbatim() {
        let err = ApiError::BadRequest(r#"{"scan_type":["not a valid choice"]}"#.to_string());
        assert!(err.to_string().contains("not a valid choice"));
    }

    #[test]
    fn test_api_error_network() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_config_error_missing_url() {
        let err = ConfigError::MissingUrl;
        assert!(err.to_string().contains("DOJO_URL"));
    }

    #[test]
    fn test_config_error_missing_spec_path() {
        let err = ConfigError::MissingSpecPath;
        let msg = err.to_string();
        assert!(msg.contains("--api-spec"));
        assert!(msg.contains("DOJO_API_SPEC"));
    }

    #[test]
    fn test_scan_type_error_mentions_bypass() {
        let err = ScanTypeError::Invalid {
            label: "Zapp".to_string(),
            count: 8,
            source_name: "auto".to_string(),
            sample: "ZAP Scan, Trivy Scan".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Zapp'"));
        assert!(msg.contains("Found 8 values from auto"));
        assert!(msg.contains("--no-validate-scan-type"));
        assert!(msg.contains("ddcli scan-types"));
    }

    #[test]
    fn test_source_unavailable_from_invalid_response() {
        let err: SourceUnavailable = ApiError::InvalidResponse("eof".to_string()).into();
        assert!(matches!(err, SourceUnavailable::Malformed(_)));
    }

    #[test]
    fn test_source_unavailable_from_network() {
        let err: SourceUnavailable = ApiError::Network("refused".to_string()).into();
        assert!(matches!(err, SourceUnavailable::Network(_)));
    }

    #[test]
    fn test_error_from_config_error() {
        let err: Error = ConfigError::MissingUrl.into();

        match err {
            Error::Config(ConfigError::MissingUrl) => (),
            _ => panic!("Expected Error::Config(ConfigError::MissingUrl)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
