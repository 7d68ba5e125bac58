//! `ddcli scan-types`: show the resolved scan type catalog

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::Result;
use crate::models::ScanTypeListing;
use crate::output;

/// List every scan type, or the ranked matches for `query`.
pub async fn run(opts: &GlobalOptions, query: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let catalog = ctx.scan_types().await?;

    output::print(&ScanTypeListing::new(catalog, query), ctx.format)
}
