use std::sync::Arc;

use crate::application::todo_service::TodoService;

#[derive(Clone)]
pub struct AppState {
    pub todo_service: Arc<TodoService>,
}

impl AppState {
    pub fn new(todo_service: Arc<TodoService>) -> Self {
        Self { todo_service }
    }
}
