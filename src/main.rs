use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use todo_api::{
    application::todo_service::TodoService,
    build_router,
    config::AppConfig,
    infrastructure::{
        TodoRepository,
        in_memory_todo_repository::InMemoryTodoRepository,
        migrations::{connect, run_migrations},
        postgres_todo_repository::PostgresTodoRepository,
    },
    state::AppState,
    telemetry::{init_tracing, shutdown_signal},
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(about = "HTTP API for tracking todo items")]
struct Cli {
    /// Overrides TODO_BIND_ADDR.
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Serve from the in-memory store even when TODO_DATABASE_URL is set.
    #[arg(long)]
    in_memory: bool,
    /// Apply pending schema migrations before accepting traffic.
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("todo_api=debug,tower_http=info");

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    let repository = open_repository(&config, &cli).await?;
    let service = Arc::new(TodoService::new(repository));
    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(bind_addr = %config.bind_addr, "todo API started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn open_repository(config: &AppConfig, cli: &Cli) -> Result<Arc<dyn TodoRepository>> {
    let database_url = match config.database_url.as_deref() {
        Some(url) if !cli.in_memory => url,
        _ => {
            warn!("serving from the in-memory store, data is lost on shutdown");
            return Ok(Arc::new(InMemoryTodoRepository::new()));
        }
    };

    let pool = connect(database_url, config.db_max_connections).await?;
    if cli.migrate {
        run_migrations(&pool).await?;
    }

    info!(
        max_connections = config.db_max_connections,
        "connected to the todo database"
    );
    Ok(Arc::new(PostgresTodoRepository::new(pool)))
}
