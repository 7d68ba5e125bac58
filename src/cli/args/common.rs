//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - human-readable rows (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// Collapse a `--flag` / `--no-flag` pair into an optional setting.
///
/// Both flags use `overrides_with`, so at most one of them is set.
pub fn tri_state(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
