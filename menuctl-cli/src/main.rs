//! menuctl CLI - restaurant menu catalog service
//!
//! - `serve`: run the menu item HTTP API (Postgres or in-memory)
//! - `migrate`: apply the database schema and optionally seed it

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "menuctl",
    author,
    version,
    about = "Restaurant menu catalog service",
    long_about = "Create, read, update, list and delete menu items over a JSON HTTP API \
                  backed by PostgreSQL."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Apply the database schema
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "menuctl failed");
    }
    result
}
