// tests/support/helpers.rs
use super::mocks::{FixedClock, StaticIdentityVerifier};
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use campus_market::application::{
    commands::listings::ListingCommandService,
    ports::{security::IdentityVerifier, time::Clock},
    queries::listings::ListingQueryService,
    services::{ApplicationServices, IdentityPolicy},
};
use campus_market::domain::listing::ListingRepository;
use campus_market::infrastructure::repositories::InMemoryListingRepository;
use campus_market::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn campus_policy() -> IdentityPolicy {
    IdentityPolicy {
        require_verified_email: true,
        allowed_email_domains: vec!["campus.edu".into()],
    }
}

pub fn build_services(repo: InMemoryListingRepository) -> Arc<ApplicationServices> {
    let listing_repo: Arc<dyn ListingRepository> = Arc::new(repo);
    let verifier: Arc<dyn IdentityVerifier> = Arc::new(StaticIdentityVerifier);
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new());
    Arc::new(ApplicationServices::new(
        listing_repo,
        verifier,
        clock,
        campus_policy(),
    ))
}

pub fn command_service(repo: &InMemoryListingRepository, clock: Arc<FixedClock>) -> ListingCommandService {
    ListingCommandService::new(Arc::new(repo.clone()), clock)
}

pub fn query_service(repo: &InMemoryListingRepository) -> ListingQueryService {
    ListingQueryService::new(Arc::new(repo.clone()))
}

/// Router over an in-memory store. Rate limiting is off because the
/// governor key extractor needs a peer address that `oneshot` lacks.
pub fn make_test_router_with_repo(repo: InMemoryListingRepository) -> axum::Router {
    let options = RouterOptions {
        allowed_origins: Vec::new(),
        rate_limit: None,
    };
    build_router(HttpState::new(build_services(repo)), &options)
}

pub fn make_test_router() -> axum::Router {
    make_test_router_with_repo(InMemoryListingRepository::new())
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends one request and returns the status with the decoded JSON body
/// (`Value::Null` when the body is empty).
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("expected JSON body")
    };
    (status, json)
}

/// Assert that a response is an error payload with the expected status and
/// `error` string.
pub fn assert_error_body(status: StatusCode, body: &Value, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(status, expected_status, "unexpected status, body: {body}");
    let err_field = body.get("error").and_then(Value::as_str).unwrap_or("");
    let msg_field = body.get("message").and_then(Value::as_str).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field");
}

/// Field names listed in an error payload's `details`.
pub fn detail_fields(body: &Value) -> Vec<String> {
    body.get("details")
        .and_then(Value::as_array)
        .map(|details| {
            details
                .iter()
                .filter_map(|d| d.get("field").and_then(Value::as_str).map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
