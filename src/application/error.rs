// src/application/error.rs
use crate::application::validation::{FieldViolation, ValidationFailure};
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation error: {0}")]
    Validation(ValidationFailure),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("store failure: {0}")]
    Store(String),
}

impl ApplicationError {
    pub fn validation(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationFailure::single(FieldViolation::new(
            field, message, None,
        )))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidField { field, message } => Self::invalid_field(field, message),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::Persistence(msg) => Self::Store(msg),
        }
    }
}

impl From<ValidationFailure> for ApplicationError {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }
}
