pub mod clock;
pub mod dto;
pub mod todo_service;
pub mod validation;
