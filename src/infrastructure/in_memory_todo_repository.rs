use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicI32, Ordering},
};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::DomainError,
        todo::{MIN_PERCENT_COMPLETE, NewTodo, Todo, TodoId},
    },
    infrastructure::TodoRepository,
};

#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos_by_id: RwLock<BTreeMap<TodoId, Todo>>,
    last_id: AtomicI32,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Once `TodoId::MAX` is handed out the sequence stays exhausted.
    fn next_id(&self) -> Result<TodoId, DomainError> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|previous| previous + 1)
            .map_err(|_| DomainError::storage("todo identity sequence exhausted"))
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, DomainError> {
        Ok(self.todos_by_id.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: TodoId) -> Result<Option<Todo>, DomainError> {
        Ok(self.todos_by_id.read().await.get(&id).cloned())
    }

    async fn list_due_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Todo>, DomainError> {
        Ok(self
            .todos_by_id
            .read()
            .await
            .values()
            .filter(|todo| todo.due_date >= from && todo.due_date <= to)
            .cloned()
            .collect())
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, DomainError> {
        let created = Todo {
            id: self.next_id()?,
            title: todo.title,
            description: todo.description,
            due_date: todo.due_date,
            percent_complete: MIN_PERCENT_COMPLETE,
            is_done: false,
        };

        self.todos_by_id
            .write()
            .await
            .insert(created.id, created.clone());

        Ok(created)
    }

    async fn save(&self, todo: &Todo) -> Result<Option<Todo>, DomainError> {
        let mut todos_by_id = self.todos_by_id.write().await;
        let Some(stored) = todos_by_id.get_mut(&todo.id) else {
            return Ok(None);
        };

        *stored = todo.clone();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, DomainError> {
        Ok(self.todos_by_id.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 3, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid timestamp")
    }

    fn new_todo(title: &str, due_date: NaiveDateTime) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: None,
            due_date,
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids_and_defaults() {
        let repository = InMemoryTodoRepository::new();

        let first = repository
            .create(new_todo("first", at(1, 9)))
            .await
            .expect("create first");
        let second = repository
            .create(new_todo("second", at(1, 9)))
            .await
            .expect("create second");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.percent_complete, 0);
        assert!(!first.is_done);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repository = InMemoryTodoRepository::new();
        let first = repository
            .create(new_todo("first", at(1, 9)))
            .await
            .expect("create first");

        assert!(repository.delete(first.id).await.expect("delete"));
        assert!(!repository.delete(first.id).await.expect("second delete"));

        let second = repository
            .create(new_todo("second", at(1, 9)))
            .await
            .expect("create second");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn exhausted_sequence_never_wraps_to_negative_ids() {
        let repository = InMemoryTodoRepository::new();
        repository.last_id.store(TodoId::MAX - 1, Ordering::SeqCst);

        let last = repository
            .create(new_todo("last", at(1, 9)))
            .await
            .expect("final id is still available");
        assert_eq!(last.id, TodoId::MAX);

        for _ in 0..3 {
            let result = repository.create(new_todo("overflow", at(1, 9))).await;
            assert!(matches!(result, Err(DomainError::Storage(_))));
        }
        assert_eq!(repository.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn save_returns_none_for_missing_row() {
        let repository = InMemoryTodoRepository::new();
        let mut todo = repository
            .create(new_todo("gone", at(1, 9)))
            .await
            .expect("create");
        repository.delete(todo.id).await.expect("delete");

        todo.title = "resurrected".to_string();
        assert!(repository.save(&todo).await.expect("save").is_none());
        assert!(repository.get_by_id(todo.id).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn list_due_between_is_inclusive_on_both_ends() {
        let repository = InMemoryTodoRepository::new();
        for (title, due_date) in [
            ("before", at(1, 23)),
            ("lower", at(2, 0)),
            ("inside", at(5, 12)),
            ("upper", at(9, 0)),
            ("after", at(9, 1)),
        ] {
            repository
                .create(new_todo(title, due_date))
                .await
                .expect("create");
        }

        let titles = repository
            .list_due_between(at(2, 0), at(9, 0))
            .await
            .expect("list window")
            .into_iter()
            .map(|todo| todo.title)
            .collect::<Vec<_>>();

        assert_eq!(titles, vec!["lower", "inside", "upper"]);
    }

    #[tokio::test]
    async fn concurrent_creates_never_share_an_id() {
        let repository = Arc::new(InMemoryTodoRepository::new());
        let mut handles = Vec::new();
        for index in 0..64 {
            let repository = Arc::clone(&repository);
            handles.push(tokio::spawn(async move {
                repository
                    .create(new_todo(&format!("todo {index}"), at(1, 9)))
                    .await
                    .expect("create")
                    .id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("task joined"));
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 64);
        assert_eq!(repository.list().await.expect("list").len(), 64);
    }
}
