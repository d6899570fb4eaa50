// src/presentation/http/routes.rs
use crate::presentation::http::middleware::rate_limit::{RateLimitSettings, rate_limit_layer};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::listings,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Transport settings that shape the router around the handlers.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Browser origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
    pub rate_limit: Option<RateLimitSettings>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, options: &RouterOptions) -> Router {
    let api = Router::new()
        .route(
            "/api/v1/listings",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route("/api/v1/listings/mine", get(listings::list_own_listings))
        .route(
            "/api/v1/listings/{id}",
            get(listings::get_listing)
                .put(listings::update_listing)
                .patch(listings::patch_listing)
                .delete(listings::delete_listing),
        );

    let api = match options.rate_limit.and_then(rate_limit_layer) {
        Some(layer) => api.layer(layer),
        None => {
            if options.rate_limit.is_some() {
                tracing::warn!("rate limit settings rejected, serving without rate limiting");
            }
            api
        }
    };

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
