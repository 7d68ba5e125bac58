//! `ddcli interactive`: product, engagement and scan type wizard

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::debug;

use crate::cli::direct::{self, ImportPlan};
use crate::cli::{CommandContext, GlobalOptions, OutputFormat, prompt};
use crate::client::models::{
    Engagement, ImportScanRequest, NewEngagement, NewProduct, Product, ReimportScanRequest, Test,
};
use crate::client::{CatalogApi, DefectDojoClient};
use crate::error::{ConfigError, Result};
use crate::models::ImportSummary;
use crate::output::{self, progress};

const CREATE_PRODUCT: &str = "<Create new product>";
const CREATE_ENGAGEMENT: &str = "<Create new engagement>";

/// Whether the upload creates a test or updates one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Reimport,
    Import,
}

impl ImportMode {
    const ALL: [ImportMode; 2] = [ImportMode::Reimport, ImportMode::Import];

    fn label(self) -> &'static str {
        match self {
            ImportMode::Reimport => "Re-import into existing Test",
            ImportMode::Import => "Import (create new Test)",
        }
    }
}

/// Selection items: the names followed by the create entry.
fn with_create_entry<I: IntoIterator<Item = String>>(names: I, create: &str) -> Vec<String> {
    names
        .into_iter()
        .chain(std::iter::once(create.to_string()))
        .collect()
}

/// Parse an engagement end date, treating blank input as `today`.
pub fn parse_end_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        ConfigError::Invalid(format!("End date must be YYYY-MM-DD, got '{}'", input)).into()
    })
}

/// The upload for the chosen mode. Reimport without a test falls back to import.
pub fn plan_upload(
    mode: ImportMode,
    engagement: &Engagement,
    test: Option<&Test>,
    scan_type: &str,
    file: PathBuf,
) -> ImportPlan {
    match (mode, test) {
        (ImportMode::Reimport, Some(test)) => {
            ImportPlan::Reimport(ReimportScanRequest::into_test(test.id, scan_type, file))
        }
        _ => ImportPlan::Import(ImportScanRequest::into_engagement(
            engagement.id,
            scan_type,
            file,
        )),
    }
}

async fn choose_product(client: &DefectDojoClient, theme: &ColorfulTheme) -> Result<Product> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Search product (or leave empty to list)")
        .allow_empty(true)
        .interact_text()?;
    let query = query.trim();

    let products = client
        .list_products((!query.is_empty()).then_some(query))
        .await?;
    let items = with_create_entry(products.iter().map(|p| p.name.clone()), CREATE_PRODUCT);
    let index = Select::with_theme(theme)
        .with_prompt("Pick a product or create a new one")
        .items(&items)
        .default(0)
        .interact()?;

    match products.get(index) {
        Some(product) => Ok(product.clone()),
        None => {
            let name: String = Input::with_theme(theme)
                .with_prompt("New product name")
                .interact_text()?;
            client.create_product(&NewProduct::named(name.trim())).await
        }
    }
}

async fn choose_engagement(
    client: &DefectDojoClient,
    theme: &ColorfulTheme,
    product: &Product,
) -> Result<Engagement> {
    let engagements = client.list_engagements(product.id).await?;
    let items = with_create_entry(
        engagements.iter().map(Engagement::display_name),
        CREATE_ENGAGEMENT,
    );
    let index = Select::with_theme(theme)
        .with_prompt("Pick an engagement or create a new one")
        .items(&items)
        .default(0)
        .interact()?;

    if let Some(engagement) = engagements.get(index) {
        return Ok(engagement.clone());
    }

    let name: String = Input::with_theme(theme)
        .with_prompt("Engagement name")
        .interact_text()?;
    let today = Local::now().date_naive();
    let end: String = Input::with_theme(theme)
        .with_prompt("End date (YYYY-MM-DD)")
        .default(today.format("%Y-%m-%d").to_string())
        .interact_text()?;
    let end = parse_end_date(&end, today)?;

    client
        .create_engagement(&NewEngagement::ci_cd(product.id, name.trim(), today, end))
        .await
}

fn choose_mode(theme: &ColorfulTheme) -> Result<ImportMode> {
    let labels: Vec<&str> = ImportMode::ALL.iter().map(|m| m.label()).collect();
    let index = Select::with_theme(theme)
        .with_prompt("Import mode")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(ImportMode::ALL[index])
}

fn choose_file(theme: &ColorfulTheme) -> Result<PathBuf> {
    let path: String = Input::with_theme(theme)
        .with_prompt("Path to scan file")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if PathBuf::from(input.trim()).is_file() {
                Ok(())
            } else {
                Err(format!("No such file: {}", input.trim()))
            }
        })
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

async fn choose_test(
    client: &DefectDojoClient,
    theme: &ColorfulTheme,
    engagement: &Engagement,
) -> Result<Option<Test>> {
    let tests = client.list_tests(engagement.id).await?;
    if tests.is_empty() {
        println!(
            "{}",
            "No tests found in this engagement; switching to new import.".yellow()
        );
        return Ok(None);
    }

    let items: Vec<String> = tests.iter().map(Test::choice_label).collect();
    let index = Select::with_theme(theme)
        .with_prompt("Select a test")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(tests.into_iter().nth(index))
}

/// Run the interactive wizard
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let client = ctx.client()?;
    let theme = ColorfulTheme::default();

    let product = choose_product(&client, &theme).await?;
    debug!("Product {} ({})", product.name, product.id);
    let engagement = choose_engagement(&client, &theme, &product).await?;
    debug!("Engagement {}", engagement.id);

    let mode = choose_mode(&theme)?;
    let file = choose_file(&theme)?;

    let catalog = ctx.scan_types().await?;
    let scan_type = prompt::choose_scan_type(catalog, ctx.settings.validate_scan_type)?;

    let test = match mode {
        ImportMode::Reimport => choose_test(&client, &theme, &engagement).await?,
        ImportMode::Import => None,
    };
    let plan = plan_upload(mode, &engagement, test.as_ref(), &scan_type, file);

    let spinner = progress::spinner("Uploading scan...", ctx.show_progress());
    let response = direct::execute(client.as_ref(), &plan).await;
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
