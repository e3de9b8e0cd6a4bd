//! Todo tracking HTTP API.
//!
//! Requests pass through [`application::validation`] before reaching
//! [`application::todo_service::TodoService`], which talks to a
//! [`infrastructure::TodoRepository`] (Postgres in production, in-memory in
//! tests).

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod state;
pub mod telemetry;

pub use app::build_router;
