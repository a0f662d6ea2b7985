//! HTTP server command
//!
//! Runs the menu catalog API over Postgres, or over an in-memory store with
//! `--in-memory`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use menuctl_server::db::{
    create_pool, migrations, seed_if_empty, InMemoryStore, MenuItemStore, PgMenuItemStore,
    PoolConfig,
};
use menuctl_server::http::{run_server, ServerConfig};

use super::DEFAULT_DATABASE_URL;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "MENUCTL_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Database URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = menuctl_server::db::pool::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Skip inserting the sample menu into an empty store
    #[arg(long)]
    pub no_seed: bool,

    /// Keep items in process memory instead of Postgres (lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

async fn open_store(args: &ServeArgs) -> Result<Arc<dyn MenuItemStore>> {
    if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        return Ok(Arc::new(InMemoryStore::new()));
    }

    let pool_config = PoolConfig {
        database_url: args.database_url.clone(),
        max_connections: args.max_connections,
    };
    let pool = create_pool(&pool_config)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to apply schema")?;

    Ok(Arc::new(PgMenuItemStore::new(pool)))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = open_store(&args).await?;

    if !args.no_seed {
        seed_if_empty(store.as_ref())
            .await
            .context("Failed to seed sample menu")?;
    }

    tracing::info!("Starting menuctl server on {}", args.bind);

    // Blocks until shutdown
    run_server(store, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn defaults() {
        let Wrapper { args } = Wrapper::parse_from(["serve"]);
        assert_eq!(args.max_connections, 5);
        assert!(!args.in_memory);

        let config = args.server_config();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.cors_permissive);
    }

    #[test]
    fn flags_override_defaults() {
        let Wrapper { args } = Wrapper::parse_from([
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--timeout",
            "5",
            "--in-memory",
            "--no-seed",
        ]);
        let config = args.server_config();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(args.in_memory && args.no_seed);
    }

    #[tokio::test]
    async fn in_memory_store_needs_no_database() {
        let Wrapper { args } = Wrapper::parse_from(["serve", "--in-memory"]);
        let store = open_store(&args).await.unwrap();
        assert_eq!(seed_if_empty(store.as_ref()).await.unwrap(), 4);
    }
}
