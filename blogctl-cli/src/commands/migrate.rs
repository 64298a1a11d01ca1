//! Schema migration command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use blogctl_server::db::{create_pool, run_migrations};
use blogctl_server::BlogConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Config file (default: ~/.blogctl/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

/// Apply pending migrations and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let mut config = BlogConfig::load(args.config.as_deref())?;
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let pool = create_pool(config.database_url()?)
        .await
        .context("Failed to create database pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations applied");
    Ok(())
}
