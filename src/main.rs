mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, DbCommands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "coin_dash=info,coin_service=info,coin_upstream=info,coin_database=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; anything else is worth a warning
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args).await?,
        Commands::Snapshot(args) => commands::snapshot::execute(args).await?,
        Commands::Db {
            command,
            database_url,
        } => match command {
            DbCommands::Migrate => commands::db::migrate(database_url).await?,
            DbCommands::Stats { format } => commands::db::stats(database_url, &format).await?,
        },
    }

    Ok(())
}
