use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use greedible_client::ApiError;

mod args;
mod commands;
mod context;
mod render;
mod session_store;

use args::{Cli, Commands};
use context::Context;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    greedible_observability::init(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = %format!("{err:#}"), "command failed");
            eprintln!("error: {}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::initialize(cli.json, cli.token)?;

    match cli.command {
        Commands::Login(args) => commands::auth::login(&ctx, args).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Inventory(command) => commands::inventory::run(&ctx, command).await,
        Commands::Restocks(command) => commands::restocks::run(&ctx, command).await,
        Commands::Recipes(command) => commands::recipes::run(&ctx, command).await,
        Commands::Staff(command) => commands::staff::run(&ctx, command).await,
        Commands::Schedule(command) => commands::schedule::run(&ctx, command).await,
        Commands::Dashboard(command) => commands::dashboard::run(&ctx, command).await,
    }
}

/// The message shown to the user: an API error's inline message, otherwise
/// the whole context chain.
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api) => api.user_message(),
        None => format!("{err:#}"),
    }
}
