use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    validation::{FieldViolation, ValidationFailure},
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
    details: Option<Vec<FieldViolation>>,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(failure) => Self::validation(failure),
            ApplicationError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ApplicationError::Unauthorized(msg) => Self::new(StatusCode::UNAUTHORIZED, msg),
            ApplicationError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg),
            ApplicationError::Store(msg) => {
                tracing::error!(error = %msg, "store failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }

    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        Self::malformed("body", rejection.body_text())
    }

    pub fn from_query_rejection(rejection: QueryRejection) -> Self {
        Self::malformed("query", rejection.body_text())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn malformed(field: &str, message: String) -> Self {
        Self::validation(ValidationFailure::single(FieldViolation::new(
            field, message, None,
        )))
    }

    fn validation(failure: ValidationFailure) -> Self {
        let message = format!("request failed validation: {failure}");
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            details: Some(failure.into_violations()),
        }
    }

    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            details: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorBody {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
            details: self.details,
        };
        (self.status, Json(payload)).into_response()
    }
}

/// Error payload shared by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
