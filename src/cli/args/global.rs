//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat, tri_state};
use crate::config::Overrides;

/// Global CLI options passed to all command handlers.
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file values are merged later in
/// `CommandContext`.
#[derive(Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.ddcli/config.yaml)
    pub config: Option<String>,

    /// Connection and scan type settings given on the command line
    pub overrides: Overrides,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            overrides: Overrides {
                url: cli.url.clone(),
                token: cli.token.clone(),
                username: cli.username.clone(),
                password: cli.password.clone(),
                api_spec: cli.api_spec.clone(),
                scan_types_source: cli.scan_types_source,
                validate_scan_type: tri_state(cli.validate_scan_type, cli.no_validate_scan_type),
            },
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
