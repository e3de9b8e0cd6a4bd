//! One-shot schema migration. Run to completion before starting `todo-api`.

use anyhow::{Context, Result};
use todo_api::{
    config::AppConfig,
    infrastructure::migrations::{connect, run_migrations},
    telemetry::init_tracing,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("todo_api=info,todo_migrate=info,sqlx=warn");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let database_url = config.require_database_url()?;

    let pool = connect(database_url, 1).await?;
    run_migrations(&pool).await?;
    pool.close().await;

    info!("migration finished");
    Ok(())
}
