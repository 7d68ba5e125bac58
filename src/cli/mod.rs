//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod context;
pub mod direct;
pub mod interactive;
pub mod prompt;
pub mod scan_types;

pub use args::{GlobalOptions, OutputFormat, tri_state};
pub use context::CommandContext;
pub use direct::DirectArgs;

use crate::scan_types::ScanTypeSource;

/// ddcli - Upload security scan results to DefectDojo
#[derive(Parser)]
#[command(name = "ddcli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// DefectDojo base URL
    #[arg(long, global = true, env = "DOJO_URL", hide_env = true)]
    pub url: Option<String>,

    /// API token
    #[arg(
        long,
        global = true,
        env = "DOJO_TOKEN",
        hide_env = true,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Username, exchanged with --password for a token
    #[arg(long, global = true, env = "DOJO_USERNAME", hide_env = true)]
    pub username: Option<String>,

    /// Password for --username
    #[arg(
        long,
        global = true,
        env = "DOJO_PASSWORD",
        hide_env = true,
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Local OpenAPI JSON file used as a scan type source
    #[arg(long, global = true, env = "DOJO_API_SPEC", hide_env = true)]
    pub api_spec: Option<PathBuf>,

    /// Where to load valid scan types from
    #[arg(
        long,
        global = true,
        value_enum,
        env = "DOJO_SCAN_TYPES_SOURCE",
        hide_env = true
    )]
    pub scan_types_source: Option<ScanTypeSource>,

    /// Check the scan type against the catalog before uploading (default)
    #[arg(long, global = true, overrides_with = "no_validate_scan_type")]
    pub validate_scan_type: bool,

    /// Upload whatever scan type was given
    #[arg(long, global = true, overrides_with = "validate_scan_type")]
    pub no_validate_scan_type: bool,

    /// Override config file location
    #[arg(long, global = true, env = "DDCLI_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "DDCLI_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, global = true, env = "DDCLI_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Guided upload: pick product, engagement and scan type step by step
    Interactive,

    /// Upload a scan file in one shot (for CI)
    Direct(DirectArgs),

    /// List the scan types DefectDojo accepts, or the matches for QUERY
    ScanTypes {
        /// Partial scan type name to rank against the catalog
        query: Option<String>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
