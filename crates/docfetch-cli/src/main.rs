//! docfetch CLI - cached .NET API documentation pages
//!
//! Entry point for the `docfetch` binary. Command implementations live in
//! [`commands`]; exit codes are described in [`error`].

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod utils;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = utils::logging::initialize_logging(&cli) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match execute_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            error::category_from_error(&err).as_exit_code()
        },
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Fetch {
            item,
            ignore_cache,
            output,
        } => commands::fetch_page(cli, item, *ignore_cache, output.as_deref()).await,
        Commands::Info { item } => commands::show_info(cli, item).await,
        Commands::Config => commands::show_config(cli),
    }
}
