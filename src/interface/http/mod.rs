pub mod openapi;
pub mod problem;
pub mod todo_handler;
