// src/presentation/http/controllers/listings.rs
use crate::application::{
    commands::listings::{CreateListingCommand, DeleteListingCommand, UpdateListingCommand},
    dto::{ListingDto, ListingPageDto},
    queries::listings::{GetListingQuery, ListListingsQuery, ListOwnListingsQuery},
    validation::{CreateListingInput, ListingQueryInput, UpdateListingInput},
};
use crate::presentation::http::error::{ErrorBody, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, JsonBody, QueryParams};
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, body::Bytes, extract::Path, http::StatusCode};

#[utoipa::path(
    get,
    path = "/api/v1/listings",
    params(ListingQueryInput),
    responses(
        (status = 200, description = "One page of listings.", body = ListingPageDto),
        (status = 400, description = "Invalid query parameters.", body = ErrorBody)
    ),
    security(()),
    tag = "Listings"
)]
pub async fn list_listings(
    Extension(state): Extension<HttpState>,
    QueryParams(params): QueryParams<ListingQueryInput>,
) -> HttpResult<Json<ListingPageDto>> {
    state
        .services
        .listing_queries
        .list_listings(ListListingsQuery { params })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/mine",
    params(ListingQueryInput),
    responses(
        (status = 200, description = "Listings owned by the caller.", body = ListingPageDto),
        (status = 400, description = "Invalid query parameters.", body = ErrorBody),
        (status = 401, description = "Missing or invalid credential.", body = ErrorBody)
    ),
    tag = "Listings"
)]
pub async fn list_own_listings(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    QueryParams(params): QueryParams<ListingQueryInput>,
) -> HttpResult<Json<ListingPageDto>> {
    state
        .services
        .listing_queries
        .list_own_listings(&actor, ListOwnListingsQuery { params })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "The listing.", body = ListingDto),
        (status = 404, description = "No such listing.", body = ErrorBody)
    ),
    security(()),
    tag = "Listings"
)]
pub async fn get_listing(
    Extension(state): Extension<HttpState>,
    Path(id): Path<String>,
) -> HttpResult<Json<ListingDto>> {
    state
        .services
        .listing_queries
        .get_listing(GetListingQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = CreateListingInput,
    responses(
        (status = 201, description = "Listing created.", body = ListingDto),
        (status = 400, description = "Validation failed.", body = ErrorBody),
        (status = 401, description = "Missing or invalid credential.", body = ErrorBody)
    ),
    tag = "Listings"
)]
pub async fn create_listing(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    JsonBody(input): JsonBody<CreateListingInput>,
) -> HttpResult<(StatusCode, Json<ListingDto>)> {
    state
        .services
        .listing_commands
        .create_listing(&actor, CreateListingCommand { input })
        .await
        .into_http()
        .map(|dto| (StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    put,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = UpdateListingInput,
    responses(
        (status = 200, description = "Listing updated.", body = ListingDto),
        (status = 400, description = "Validation failed.", body = ErrorBody),
        (status = 401, description = "Missing or invalid credential.", body = ErrorBody),
        (status = 403, description = "Caller does not own the listing.", body = ErrorBody),
        (status = 404, description = "No such listing.", body = ErrorBody)
    ),
    tag = "Listings"
)]
/// The body is taken raw and only parsed after the ownership check.
pub async fn update_listing(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<String>,
    body: Bytes,
) -> HttpResult<Json<ListingDto>> {
    state
        .services
        .listing_commands
        .update_listing(&actor, UpdateListingCommand::new(id, body.to_vec()))
        .await
        .into_http()
        .map(Json)
}

/// PATCH shares the partial-update semantics of PUT.
#[utoipa::path(
    patch,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = UpdateListingInput,
    responses(
        (status = 200, description = "Listing updated.", body = ListingDto),
        (status = 400, description = "Validation failed.", body = ErrorBody),
        (status = 401, description = "Missing or invalid credential.", body = ErrorBody),
        (status = 403, description = "Caller does not own the listing.", body = ErrorBody),
        (status = 404, description = "No such listing.", body = ErrorBody)
    ),
    tag = "Listings"
)]
pub async fn patch_listing(
    state: Extension<HttpState>,
    actor: Authenticated,
    id: Path<String>,
    body: Bytes,
) -> HttpResult<Json<ListingDto>> {
    update_listing(state, actor, id, body).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing deleted.", body = StatusResponse),
        (status = 401, description = "Missing or invalid credential.", body = ErrorBody),
        (status = 403, description = "Caller does not own the listing.", body = ErrorBody),
        (status = 404, description = "No such listing.", body = ErrorBody)
    ),
    tag = "Listings"
)]
pub async fn delete_listing(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .listing_commands
        .delete_listing(&actor, DeleteListingCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}
