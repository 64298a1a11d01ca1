//! HTTP server command
//!
//! Flags override the config file and environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use blogctl_server::db::{create_pool_with_options, run_migrations, BlogStore, MemoryStore, PgStore};
use blogctl_server::http::{run_server, AppState};
use blogctl_server::BlogConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Config file (default: ~/.blogctl/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Keep data in memory instead of PostgreSQL (lost on exit)
    #[arg(long, conflicts_with = "database_url")]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = BlogConfig::load(args.config.as_deref())?;

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if args.cors_permissive {
        config.server.cors_permissive = true;
    }
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let store: Arc<dyn BlogStore> = if args.memory {
        tracing::warn!("Using in-memory store - data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let pool = create_pool_with_options(config.database_url()?, config.database.max_connections)
            .await
            .context("Failed to create database pool")?;

        if config.database.run_migrations {
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
        }
        Arc::new(PgStore::new(pool))
    };

    tracing::info!("Starting blogctl server on {}", config.server.bind);

    // Blocks until shutdown
    run_server(AppState::new(store), &config.server)
        .await
        .context("Server error")?;

    Ok(())
}
