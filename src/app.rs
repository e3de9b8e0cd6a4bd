use axum::{
    Router,
    http::{HeaderName, Method},
    routing::{get, patch},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    interface::http::{
        openapi::{OPENAPI_PATH, openapi_document},
        todo_handler::{
            create, delete, get_all, get_by_id, get_upcoming, healthcheck, mark_done, update,
            update_percent,
        },
    },
    state::AppState,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn build_router(state: AppState) -> Router {
    let todo_routes = Router::new()
        .route("/todo", get(get_all).post(create))
        .route("/todo/upcoming", get(get_upcoming))
        .route("/todo/{id}", get(get_by_id).put(update).delete(delete))
        .route("/todo/{id}/percent", patch(update_percent))
        .route("/todo/{id}/done", patch(mark_done));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(healthcheck))
        .route(OPENAPI_PATH, get(openapi_document))
        .merge(todo_routes)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(todo_cors())
        .with_state(state)
}

/// Browser clients may call every verb the todo routes expose.
fn todo_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
}
