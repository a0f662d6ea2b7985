//! Schema migration command
//!
//! Applies the `menu_items` schema and exits. Safe to run repeatedly.

use anyhow::{Context, Result};
use clap::Parser;

use menuctl_server::db::{create_pool, migrations, seed_if_empty, PgMenuItemStore, PoolConfig};

use super::DEFAULT_DATABASE_URL;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Also insert the sample menu when the table is empty
    #[arg(long)]
    pub seed: bool,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&PoolConfig::new(args.database_url))
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to apply schema")?;
    tracing::info!("Schema is up to date");

    if args.seed {
        let store = PgMenuItemStore::new(pool.clone());
        let inserted = seed_if_empty(&store)
            .await
            .context("Failed to seed sample menu")?;
        tracing::info!(inserted, "Seed complete");
    }

    pool.close().await;
    Ok(())
}
