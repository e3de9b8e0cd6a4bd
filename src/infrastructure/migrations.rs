use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{
    PgPool,
    migrate::Migrator,
    postgres::PgPoolOptions,
};
use tracing::info;

/// Schema migrations embedded from `migrations/` at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("failed to connect to the todo database")
}

/// Applies every pending migration. Already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let known = MIGRATOR.iter().count();
    info!(known_migrations = known, "applying todo schema migrations");

    MIGRATOR
        .run(pool)
        .await
        .context("failed to apply todo schema migrations")?;

    info!("todo schema is up to date");
    Ok(())
}
