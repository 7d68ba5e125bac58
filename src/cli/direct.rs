//! `ddcli direct`: one-shot import or reimport for scripts and CI

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use log::info;
use serde_json::Value;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, tri_state};
use crate::client::ImportApi;
use crate::client::models::{ImportScanRequest, ImportTarget, ReimportScanRequest, Severity};
use crate::error::{ConfigError, Result};
use crate::models::ImportSummary;
use crate::output::{self, progress};
use crate::scan_types::registry;

/// Arguments for `ddcli direct`
#[derive(Debug, Clone, Args)]
pub struct DirectArgs {
    /// Scan result file to upload
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// DefectDojo scan type, e.g. "ZAP Scan"
    #[arg(long)]
    pub scan_type: String,

    /// Product name (with --engagement)
    #[arg(long)]
    pub product: Option<String>,

    /// Engagement name (with --product)
    #[arg(long)]
    pub engagement: Option<String>,

    /// Import into this engagement
    #[arg(long)]
    pub engagement_id: Option<i64>,

    /// Reimport into this test
    #[arg(long)]
    pub test_id: Option<i64>,

    /// Drop findings below this severity
    #[arg(long, value_enum, ignore_case = true, default_value_t = Severity::Info)]
    pub min_severity: Severity,

    /// Mark findings active
    #[arg(long, overrides_with = "no_active")]
    pub active: bool,

    /// Mark findings inactive
    #[arg(long, overrides_with = "active")]
    pub no_active: bool,

    /// Mark findings verified
    #[arg(long, overrides_with = "no_verified")]
    pub verified: bool,

    /// Mark findings unverified
    #[arg(long, overrides_with = "verified")]
    pub no_verified: bool,

    /// Create the product and engagement if they do not exist
    #[arg(long)]
    pub auto_create_context: bool,

    /// Title for the created test
    #[arg(long)]
    pub test_title: Option<String>,
}

/// The upload a `direct` invocation will perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportPlan {
    Import(ImportScanRequest),
    Reimport(ReimportScanRequest),
}

impl ImportPlan {
    /// Pick reimport, import by ID, or import by name from the arguments.
    pub fn from_args(args: &DirectArgs) -> Result<Self> {
        if !args.file.is_file() {
            return Err(ConfigError::Invalid(format!(
                "Scan file not found: {}",
                args.file.display()
            ))
            .into());
        }

        let active = tri_state(args.active, args.no_active);
        let verified = tri_state(args.verified, args.no_verified);

        if let Some(test_id) = args.test_id {
            return Ok(Self::Reimport(ReimportScanRequest {
                minimum_severity: args.min_severity,
                active,
                verified,
                ..ReimportScanRequest::into_test(test_id, &args.scan_type, args.file.clone())
            }));
        }

        let target = match (args.engagement_id, &args.product, &args.engagement) {
            (Some(id), _, _) => ImportTarget::Engagement(id),
            (None, Some(product), Some(engagement)) => ImportTarget::Named {
                product_name: product.clone(),
                engagement_name: engagement.clone(),
                auto_create_context: args.auto_create_context,
            },
            _ => {
                return Err(ConfigError::Invalid(
                    "Provide --engagement-id or both --product and --engagement.".to_string(),
                )
                .into());
            }
        };

        Ok(Self::Import(ImportScanRequest {
            scan_type: args.scan_type.clone(),
            file: args.file.clone(),
            target,
            minimum_severity: args.min_severity,
            test_title: args.test_title.clone(),
            deduplication_on_engagement: None,
            active,
            verified,
        }))
    }

    pub fn scan_type(&self) -> &str {
        match self {
            Self::Import(req) => &req.scan_type,
            Self::Reimport(req) => &req.scan_type,
        }
    }

    pub fn done_message(&self) -> &'static str {
        match self {
            Self::Import(_) => "Import done.",
            Self::Reimport(_) => "Reimport done.",
        }
    }
}

/// Send the planned upload.
pub async fn execute<A: ImportApi + ?Sized>(api: &A, plan: &ImportPlan) -> Result<Value> {
    match plan {
        ImportPlan::Import(req) => {
            info!("Importing {} as '{}'", req.file.display(), req.scan_type);
            api.import_scan(req).await
        }
        ImportPlan::Reimport(req) => {
            info!(
                "Reimporting {} into test {} as '{}'",
                req.file.display(),
                req.test_id,
                req.scan_type
            );
            api.reimport_scan(req).await
        }
    }
}

/// Run the direct command
pub async fn run(opts: &GlobalOptions, args: DirectArgs) -> Result<()> {
    let plan = ImportPlan::from_args(&args)?;
    let ctx = CommandContext::new(opts).await?;
    let client = ctx.client()?;

    if ctx.settings.validate_scan_type {
        let catalog = ctx.scan_types().await?;
        registry::ensure_valid(plan.scan_type(), catalog)?;
    }

    let spinner = progress::spinner("Uploading scan...", ctx.show_progress());
    let response = execute(client.as_ref(), &plan).await;
    spinner.finish_and_clear();
    let response = response?;

    if ctx.format == OutputFormat::Table {
        println!("{}", plan.done_message().green());
    }
    output::print(
        &ImportSummary::from_response(response, client.base_url()),
        ctx.format,
    )
}
