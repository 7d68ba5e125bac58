//! ddcli - Upload security scan results to DefectDojo

use clap::{CommandFactory, Parser};
use env_logger::Env;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod scan_types;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --debug
    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Interactive => cli::interactive::run(&opts).await,
        Commands::Direct(args) => cli::direct::run(&opts, args).await,
        Commands::ScanTypes { query } => cli::scan_types::run(&opts, query.as_deref()).await,
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
