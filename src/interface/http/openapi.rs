use axum::Json;
use utoipa::OpenApi;

use crate::{
    application::dto::{CreateTodoRequest, HealthResponse, TodoResponse, UpdateTodoRequest},
    interface::http::todo_handler,
};

pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        description = "Create, track and complete todo items with due dates."
    ),
    paths(
        todo_handler::healthcheck,
        todo_handler::get_all,
        todo_handler::get_upcoming,
        todo_handler::get_by_id,
        todo_handler::create,
        todo_handler::update,
        todo_handler::update_percent,
        todo_handler::delete,
        todo_handler::mark_done,
    ),
    components(schemas(TodoResponse, CreateTodoRequest, UpdateTodoRequest, HealthResponse)),
    tags((name = "todo", description = "Todo items and their completion state"))
)]
pub struct ApiDoc;

pub async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
