use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::{
    errors::DomainError,
    todo::{NewTodo, Todo, TodoId},
};

pub mod in_memory_todo_repository;
pub mod migrations;
pub mod postgres_todo_repository;

/// Storage seam for todos. Every call is a single round-trip to the store;
/// callers get no isolation across calls.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, DomainError>;
    async fn get_by_id(&self, id: TodoId) -> Result<Option<Todo>, DomainError>;
    /// Todos with `from <= due_date <= to`.
    async fn list_due_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Todo>, DomainError>;
    async fn create(&self, todo: NewTodo) -> Result<Todo, DomainError>;
    /// Writes every mutable field of `todo`. `None` if the row no longer exists.
    async fn save(&self, todo: &Todo) -> Result<Option<Todo>, DomainError>;
    async fn delete(&self, id: TodoId) -> Result<bool, DomainError>;
}
