use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    application::{
        dto::{
            CreateTodoRequest, HealthResponse, IdRequest, TodoResponse, UpdatePercentRequest,
            UpdateTodoRequest, UpdateTodoWithIdRequest,
        },
        validation::{
            FIELD_BODY, FIELD_ID, FIELD_PERCENT_COMPLETE, ID_NOT_INTEGER_MESSAGE,
            PERCENT_NOT_INTEGER_MESSAGE, PERCENT_REQUIRED_MESSAGE, Validate, ValidationErrors,
        },
    },
    domain::{errors::DomainError, todo::TodoId},
    interface::http::problem::{ApiProblem, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentQuery {
    #[serde(default)]
    pub percent_complete: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    operation_id = "healthcheck",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[utoipa::path(
    get,
    path = "/todo",
    operation_id = "getAll",
    tag = "todo",
    responses((status = 200, description = "Every todo in store order", body = [TodoResponse]))
)]
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Json<Vec<TodoResponse>>> {
    Ok(Json(state.todo_service.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/todo/upcoming",
    operation_id = "getUpcoming",
    tag = "todo",
    responses((
        status = 200,
        description = "Todos due from the start of today through seven days ahead",
        body = [TodoResponse]
    ))
)]
pub async fn get_upcoming(State(state): State<AppState>) -> ApiResult<Json<Vec<TodoResponse>>> {
    Ok(Json(state.todo_service.get_upcoming().await?))
}

#[utoipa::path(
    get,
    path = "/todo/{id}",
    operation_id = "getById",
    tag = "todo",
    params(("id" = i32, Path, description = "Todo id, greater than 0")),
    responses(
        (status = 200, description = "The todo", body = TodoResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No todo with this id")
    )
)]
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let request = IdRequest { id: parse_id(&id)? };
    validate(&state, &request)?;

    let todo = state.todo_service.get_by_id(request.id).await?;
    Ok(found(todo))
}

#[utoipa::path(
    post,
    path = "/todo",
    operation_id = "create",
    tag = "todo",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Created; Location points at the new todo", body = TodoResponse),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload.map_err(body_problem)?;
    validate(&state, &request)?;

    let created = state.todo_service.create(request).await?;
    let location = HeaderValue::from_str(&format!("/todo/{}", created.id))
        .map_err(|error| DomainError::internal(error.to_string()))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/todo/{id}",
    operation_id = "update",
    tag = "todo",
    params(("id" = i32, Path, description = "Todo id, greater than 0")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "The replaced todo", body = TodoResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No todo with this id")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let mut errors = ValidationErrors::new();
    let id = parse_id(&id).map_err(|problem| errors.merge(problem)).ok();
    let todo = payload
        .map(|Json(todo)| todo)
        .map_err(|rejection| errors.merge(body_problem(rejection)))
        .ok();

    let (Some(id), Some(todo)) = (id, todo) else {
        return Err(incomplete_request(&state, id, errors));
    };

    let request = UpdateTodoWithIdRequest { id, todo };
    validate(&state, &request)?;

    let updated = state.todo_service.update(request.id, request.todo).await?;
    Ok(found(updated))
}

#[utoipa::path(
    patch,
    path = "/todo/{id}/percent",
    operation_id = "updatePercent",
    tag = "todo",
    params(
        ("id" = i32, Path, description = "Todo id, greater than 0"),
        ("percentComplete" = i32, Query, description = "New completion, 0 to 100")
    ),
    responses(
        (status = 200, description = "The todo with its new percentage", body = TodoResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No todo with this id")
    )
)]
pub async fn update_percent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<PercentQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let mut errors = ValidationErrors::new();
    let id = parse_id(&id).map_err(|problem| errors.merge(problem)).ok();
    let percent_complete = match query {
        Ok(Query(query)) => parse_percent(query.percent_complete.as_deref())
            .map_err(|problem| errors.merge(problem))
            .ok(),
        Err(rejection) => {
            errors.add(FIELD_PERCENT_COMPLETE, rejection.body_text());
            None
        }
    };

    let (Some(id), Some(percent_complete)) = (id, percent_complete) else {
        return Err(incomplete_request(&state, id, errors));
    };

    let request = UpdatePercentRequest {
        id,
        percent_complete,
    };
    validate(&state, &request)?;

    let updated = state
        .todo_service
        .update_percent(request.id, request.percent_complete)
        .await?;
    Ok(found(updated))
}

#[utoipa::path(
    delete,
    path = "/todo/{id}",
    operation_id = "delete",
    tag = "todo",
    params(("id" = i32, Path, description = "Todo id, greater than 0")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No todo with this id")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let request = IdRequest { id: parse_id(&id)? };
    validate(&state, &request)?;

    if state.todo_service.delete(request.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

#[utoipa::path(
    patch,
    path = "/todo/{id}/done",
    operation_id = "markDone",
    tag = "todo",
    params(("id" = i32, Path, description = "Todo id, greater than 0")),
    responses(
        (status = 200, description = "The todo, done and at 100%", body = TodoResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No todo with this id")
    )
)]
pub async fn mark_done(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let request = IdRequest { id: parse_id(&id)? };
    validate(&state, &request)?;

    let todo = state.todo_service.mark_done(request.id).await?;
    Ok(found(todo))
}

fn validate<R: Validate>(state: &AppState, request: &R) -> ApiResult<()> {
    request
        .validate(state.todo_service.today())
        .map_err(ApiProblem::from_validation)
}

/// Some input failed to parse. The id rule still runs on a parsed id so the
/// response lists every problem with the request.
fn incomplete_request(
    state: &AppState,
    id: Option<TodoId>,
    mut errors: ValidationErrors,
) -> ApiProblem {
    if let Some(id) = id
        && let Err(id_errors) = (IdRequest { id }).validate(state.todo_service.today())
    {
        errors.merge(id_errors);
    }
    ApiProblem::from_validation(errors)
}

fn found(todo: Option<TodoResponse>) -> Response {
    match todo {
        Some(todo) => Json(todo).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn parse_id(raw: &str) -> Result<TodoId, ValidationErrors> {
    raw.trim()
        .parse::<TodoId>()
        .map_err(|_| ValidationErrors::single(FIELD_ID, ID_NOT_INTEGER_MESSAGE))
}

fn parse_percent(raw: Option<&str>) -> Result<i32, ValidationErrors> {
    let Some(raw) = raw else {
        return Err(ValidationErrors::single(
            FIELD_PERCENT_COMPLETE,
            PERCENT_REQUIRED_MESSAGE,
        ));
    };

    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationErrors::single(FIELD_PERCENT_COMPLETE, PERCENT_NOT_INTEGER_MESSAGE))
}

fn body_problem(rejection: JsonRejection) -> ValidationErrors {
    ValidationErrors::single(FIELD_BODY, rejection.body_text())
}
