use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::{application::validation::ValidationErrors, domain::errors::DomainError};

pub type ApiResult<T> = Result<T, ApiProblem>;

pub const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occurred.";
pub const INTERNAL_PROBLEM_TITLE: &str = "An error occurred while processing your request.";

/// Problem document (`application/problem+json`) for 400 and 500 outcomes.
/// Not-found responses carry no body and never go through here.
#[derive(Debug)]
pub struct ApiProblem {
    status: StatusCode,
    title: &'static str,
    kind: &'static str,
    errors: Option<ValidationErrors>,
    correlation_id: String,
}

impl ApiProblem {
    pub fn from_validation(errors: ValidationErrors) -> Self {
        Self {
            errors: Some(errors),
            ..Self::new(
                StatusCode::BAD_REQUEST,
                VALIDATION_PROBLEM_TITLE,
                "https://tools.ietf.org/html/rfc9110#section-15.5.1",
            )
        }
    }

    /// Infrastructure failures are logged in full and reported opaquely.
    pub fn from_domain(error: DomainError) -> Self {
        let problem = Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_PROBLEM_TITLE,
            "https://tools.ietf.org/html/rfc9110#section-15.6.1",
        );
        error!(
            correlation_id = %problem.correlation_id,
            error = %error,
            "todo request failed"
        );
        problem
    }

    fn new(status: StatusCode, title: &'static str, kind: &'static str) -> Self {
        Self {
            status,
            title,
            kind,
            errors: None,
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

impl From<ValidationErrors> for ApiProblem {
    fn from(errors: ValidationErrors) -> Self {
        Self::from_validation(errors)
    }
}

impl From<DomainError> for ApiProblem {
    fn from(error: DomainError) -> Self {
        Self::from_domain(error)
    }
}

#[derive(Debug, Serialize)]
struct ProblemDetails {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'static str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
    #[serde(rename = "correlationId")]
    correlation_id: String,
}

impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        let payload = ProblemDetails {
            kind: self.kind,
            title: self.title,
            status: self.status.as_u16(),
            errors: self.errors,
            correlation_id: self.correlation_id,
        };

        let mut response = (self.status, Json(payload)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );

        response
    }
}
