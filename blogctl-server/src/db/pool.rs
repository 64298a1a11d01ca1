//! PostgreSQL pool and embedded migrations

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::StoreError;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// `migrations/` at the workspace root, compiled in.
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Pool capped at `max_connections` (`[database] max_connections` in config).
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    tracing::info!(count = MIGRATOR.iter().count(), "applying blog schema migrations");
    MIGRATOR.run(pool).await?;
    Ok(())
}
