// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedIdentity, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// Requires a valid bearer credential that satisfies the identity policy.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedIdentity);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::store("application state missing"))
            })?;

        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(
                    "missing Authorization header",
                ))
            })?;

        let identity = app_state
            .services
            .authenticate(header.token())
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(identity))
    }
}

/// JSON body whose deserialization failures surface as a `body` violation.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(HttpError::from_json_rejection)
    }
}

/// Query string whose deserialization failures surface as a `query`
/// violation.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(HttpError::from_query_rejection)
    }
}
