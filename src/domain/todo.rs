use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type TodoId = i32;

pub const MIN_PERCENT_COMPLETE: i32 = 0;
pub const MAX_PERCENT_COMPLETE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub percent_complete: i32,
    pub is_done: bool,
}

impl Todo {
    /// Applies the done transition: the only place where done implies 100%.
    pub fn mark_done(&mut self) {
        self.is_done = true;
        self.percent_complete = MAX_PERCENT_COMPLETE;
    }

    /// Replaces every mutable field. `is_done` and `percent_complete` are
    /// stored as given, without reconciling one against the other.
    pub fn apply(&mut self, changes: TodoChanges) {
        self.title = changes.title;
        self.description = changes.description;
        self.due_date = changes.due_date;
        self.percent_complete = changes.percent_complete;
        self.is_done = changes.is_done;
    }
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct TodoChanges {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub percent_complete: i32,
    pub is_done: bool,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> Todo {
        Todo {
            id: 1,
            title: "Write report".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2030, 1, 2)
                .and_then(|date| date.and_hms_opt(9, 0, 0))
                .expect("valid timestamp"),
            percent_complete: 40,
            is_done: false,
        }
    }

    #[test]
    fn mark_done_forces_full_completion() {
        let mut todo = sample();
        todo.mark_done();

        assert!(todo.is_done);
        assert_eq!(todo.percent_complete, 100);
    }

    #[test]
    fn apply_keeps_done_and_percent_independent() {
        let mut todo = sample();
        let due_date = todo.due_date;
        todo.apply(TodoChanges {
            title: "Rewritten".to_string(),
            description: Some(String::new()),
            due_date,
            percent_complete: 10,
            is_done: true,
        });

        assert_eq!(todo.id, 1);
        assert_eq!(todo.title, "Rewritten");
        assert_eq!(todo.description.as_deref(), Some(""));
        assert_eq!(todo.percent_complete, 10);
        assert!(todo.is_done);
    }
}
