use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::{
    application::{
        clock::{Clock, SystemClock, start_of_day},
        dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest},
    },
    domain::{
        errors::DomainError,
        todo::{Todo, TodoId},
    },
    infrastructure::TodoRepository,
};

/// Length of the upcoming window in days, counted from the start of today.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
    clock: Arc<dyn Clock>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub async fn get_all(&self) -> Result<Vec<TodoResponse>, DomainError> {
        let todos = self.repository.list().await?;
        debug!(count = todos.len(), "listed todos");
        Ok(todos.into_iter().map(TodoResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: TodoId) -> Result<Option<TodoResponse>, DomainError> {
        Ok(self.repository.get_by_id(id).await?.map(TodoResponse::from))
    }

    /// Todos due between the start of today and the same instant seven days
    /// later, both ends included.
    pub async fn get_upcoming(&self) -> Result<Vec<TodoResponse>, DomainError> {
        let from = start_of_day(self.today());
        let to = from + Duration::days(UPCOMING_WINDOW_DAYS);

        let todos = self.repository.list_due_between(from, to).await?;
        debug!(%from, %to, count = todos.len(), "listed upcoming todos");
        Ok(todos.into_iter().map(TodoResponse::from).collect())
    }

    pub async fn create(&self, request: CreateTodoRequest) -> Result<TodoResponse, DomainError> {
        let created = self.repository.create(request.into_new_todo()).await?;
        info!(id = created.id, "created todo");
        Ok(TodoResponse::from(created))
    }

    pub async fn update(
        &self,
        id: TodoId,
        request: UpdateTodoRequest,
    ) -> Result<Option<TodoResponse>, DomainError> {
        let changes = request.into_changes();
        self.modify(id, "updated todo", |todo| todo.apply(changes))
            .await
    }

    pub async fn update_percent(
        &self,
        id: TodoId,
        percent_complete: i32,
    ) -> Result<Option<TodoResponse>, DomainError> {
        self.modify(id, "updated todo percent", |todo| {
            todo.percent_complete = percent_complete;
        })
        .await
    }

    pub async fn delete(&self, id: TodoId) -> Result<bool, DomainError> {
        if self.repository.get_by_id(id).await?.is_none() {
            debug!(id, "delete skipped, todo not found");
            return Ok(false);
        }

        let deleted = self.repository.delete(id).await?;
        if deleted {
            info!(id, "deleted todo");
        }
        Ok(deleted)
    }

    pub async fn mark_done(&self, id: TodoId) -> Result<Option<TodoResponse>, DomainError> {
        self.modify(id, "marked todo done", Todo::mark_done).await
    }

    async fn modify<F>(
        &self,
        id: TodoId,
        action: &'static str,
        change: F,
    ) -> Result<Option<TodoResponse>, DomainError>
    where
        F: FnOnce(&mut Todo) + Send,
    {
        let Some(mut todo) = self.repository.get_by_id(id).await? else {
            debug!(id, action, "todo not found");
            return Ok(None);
        };

        change(&mut todo);

        let saved = self.repository.save(&todo).await?;
        if saved.is_some() {
            info!(id, "{action}");
        }
        Ok(saved.map(TodoResponse::from))
    }
}
