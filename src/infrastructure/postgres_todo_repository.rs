use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    domain::{
        errors::DomainError,
        todo::{NewTodo, Todo, TodoId},
    },
    infrastructure::TodoRepository,
};

const TODO_COLUMNS: &str =
    r#""Id", "Title", "Description", "DueDate", "PercentComplete", "IsDone""#;

#[derive(Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, DomainError> {
        let rows = sqlx::query(&format!(r#"SELECT {TODO_COLUMNS} FROM "Todos""#))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(row_to_todo).collect())
    }

    async fn get_by_id(&self, id: TodoId) -> Result<Option<Todo>, DomainError> {
        let maybe_row = sqlx::query(&format!(
            r#"SELECT {TODO_COLUMNS} FROM "Todos" WHERE "Id" = $1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(maybe_row.as_ref().map(row_to_todo))
    }

    async fn list_due_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Todo>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {TODO_COLUMNS}
            FROM "Todos"
            WHERE "DueDate" >= $1 AND "DueDate" <= $2
            "#
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(row_to_todo).collect())
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO "Todos" ("Title", "Description", "DueDate", "PercentComplete", "IsDone")
            VALUES ($1, $2, $3, 0, FALSE)
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(todo.title)
        .bind(todo.description)
        .bind(todo.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row_to_todo(&row))
    }

    async fn save(&self, todo: &Todo) -> Result<Option<Todo>, DomainError> {
        let maybe_row = sqlx::query(&format!(
            r#"
            UPDATE "Todos"
            SET "Title" = $2,
                "Description" = $3,
                "DueDate" = $4,
                "PercentComplete" = $5,
                "IsDone" = $6
            WHERE "Id" = $1
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.due_date)
        .bind(todo.percent_complete)
        .bind(todo.is_done)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(maybe_row.as_ref().map(row_to_todo))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, DomainError> {
        let result = sqlx::query(r#"DELETE FROM "Todos" WHERE "Id" = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }
}

fn row_to_todo(row: &PgRow) -> Todo {
    Todo {
        id: row.get::<i32, _>("Id"),
        title: row.get::<String, _>("Title"),
        description: row.get::<Option<String>, _>("Description"),
        due_date: row.get::<NaiveDateTime, _>("DueDate"),
        percent_complete: row.get::<i32, _>("PercentComplete"),
        is_done: row.get::<bool, _>("IsDone"),
    }
}

fn map_sqlx_error(error: sqlx::Error) -> DomainError {
    match error {
        sqlx::Error::Database(db_error) => DomainError::Storage(db_error.to_string()),
        other => DomainError::Storage(other.to_string()),
    }
}
