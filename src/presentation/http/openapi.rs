// src/presentation/http/openapi.rs
use crate::application::{
    dto::{AppliedFiltersDto, ListingDto, ListingPageDto, PaginationDto},
    validation::{CreateListingInput, FieldViolation, UpdateListingInput},
};
use crate::domain::listing::{Category, Condition, ListingStatus, SortOption};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::listings::list_listings,
        crate::presentation::http::controllers::listings::list_own_listings,
        crate::presentation::http::controllers::listings::get_listing,
        crate::presentation::http::controllers::listings::create_listing,
        crate::presentation::http::controllers::listings::update_listing,
        crate::presentation::http::controllers::listings::patch_listing,
        crate::presentation::http::controllers::listings::delete_listing,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorBody,
            FieldViolation,
            CreateListingInput,
            UpdateListingInput,
            ListingDto,
            ListingPageDto,
            PaginationDto,
            AppliedFiltersDto,
            Category,
            Condition,
            ListingStatus,
            SortOption
        )
    ),
    tags(
        (name = "Listings", description = "Browse, search and manage marketplace listings"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Campus Market API",
        description = "Listing query and mutation engine for a closed campus marketplace",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

/// Swagger UI at `/docs`, the raw document at `/openapi.json`, and a
/// redirect from `/` to the UI.
pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}
