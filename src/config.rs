use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: &str = "10";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` runs the API against the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_string("TODO_BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .context("TODO_BIND_ADDR must be a valid host:port")?;

        let database_url = std::env::var("TODO_DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let db_max_connections = env_string("TODO_DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)
            .parse::<u32>()
            .context("TODO_DB_MAX_CONNECTIONS must be u32")?;

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
        })
    }

    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("TODO_DATABASE_URL must be set")
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
