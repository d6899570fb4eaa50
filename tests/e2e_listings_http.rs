// tests/e2e_listings_http.rs
use axum::http::StatusCode;
use serde_json::{Value, json};

mod support;

use support::{
    ListingInputBuilder, OTHER_TOKEN, OUTSIDER_TOKEN, OWNER_TOKEN, UNVERIFIED_TOKEN,
    assert_error_body, detail_fields, json_request, make_test_router, send,
};

async fn create(app: &axum::Router, token: &str, body: Value) -> Value {
    let (status, json) = send(app, json_request("POST", "/api/v1/listings", Some(token), Some(&body))).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json
}

fn listing_id(listing: &Value) -> String {
    listing["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = make_test_router();
    let (status, body) = send(&app, json_request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_uses_caller_identity_not_body_owner() {
    let app = make_test_router();
    let mut body = ListingInputBuilder::new().json();
    body["owner_id"] = json!("someone-else");

    let created = create(&app, OWNER_TOKEN, body).await;
    assert_eq!(created["owner_id"], "user-a");
    assert_eq!(created["status"], "active");
    assert!(created.get("contact_phone").is_none());
}

#[tokio::test]
async fn create_with_invalid_fields_returns_400_with_details() {
    let app = make_test_router();
    let body = json!({
        "title": "abc",
        "price": "free",
        "category": "spaceships",
        "condition": "good",
        "contact_email": "not-an-email",
    });

    let (status, json) = send(&app, json_request("POST", "/api/v1/listings", Some(OWNER_TOKEN), Some(&body))).await;
    assert_error_body(status, &json, StatusCode::BAD_REQUEST, "Bad Request");
    let fields = detail_fields(&json);
    for expected in ["category", "contact_email", "description", "price", "title"] {
        assert!(fields.iter().any(|f| f == expected), "missing {expected} in {fields:?}");
    }
}

#[tokio::test]
async fn malformed_json_is_reported_on_body() {
    let app = make_test_router();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/listings")
        .header("authorization", format!("Bearer {OWNER_TOKEN}"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"title\": "))
        .unwrap();

    let (status, json) = send(&app, request).await;
    assert_error_body(status, &json, StatusCode::BAD_REQUEST, "Bad Request");
    assert_eq!(detail_fields(&json), vec!["body"]);
}

#[tokio::test]
async fn mutations_require_an_accepted_identity() {
    let app = make_test_router();
    let body = ListingInputBuilder::new().json();

    for token in [None, Some("bogus-token"), Some(UNVERIFIED_TOKEN), Some(OUTSIDER_TOKEN)] {
        let (status, json) = send(&app, json_request("POST", "/api/v1/listings", token, Some(&body))).await;
        assert_error_body(status, &json, StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let (status, _) = send(&app, json_request("GET", "/api/v1/listings/mine", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_owner_cannot_update_or_delete() {
    let app = make_test_router();
    let created = create(&app, OWNER_TOKEN, ListingInputBuilder::new().json()).await;
    let uri = format!("/api/v1/listings/{}", listing_id(&created));

    let patch = json!({ "price": 1 });
    let (status, json) = send(&app, json_request("PUT", &uri, Some(OTHER_TOKEN), Some(&patch))).await;
    assert_error_body(status, &json, StatusCode::FORBIDDEN, "Forbidden");

    let (status, json) = send(&app, json_request("DELETE", &uri, Some(OTHER_TOKEN), None)).await;
    assert_error_body(status, &json, StatusCode::FORBIDDEN, "Forbidden");

    let (status, json) = send(&app, json_request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], 15.0);
}

#[tokio::test]
async fn owner_can_patch_then_delete() {
    let app = make_test_router();
    let created = create(&app, OWNER_TOKEN, ListingInputBuilder::new().json()).await;
    let uri = format!("/api/v1/listings/{}", listing_id(&created));

    let patch = json!({ "price": "9.5", "status": "inactive" });
    let (status, json) = send(&app, json_request("PATCH", &uri, Some(OWNER_TOKEN), Some(&patch))).await;
    assert_eq!(status, StatusCode::OK, "patch failed: {json}");
    assert_eq!(json["price"], 9.5);
    assert_eq!(json["status"], "inactive");
    assert_eq!(json["title"], created["title"]);

    let (status, json) = send(&app, json_request("DELETE", &uri, Some(OWNER_TOKEN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "deleted");

    let (status, json) = send(&app, json_request("GET", &uri, None, None)).await;
    assert_error_body(status, &json, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let app = make_test_router();
    let (status, json) = send(&app, json_request("GET", "/api/v1/listings/not-a-uuid", None, None)).await;
    assert_error_body(status, &json, StatusCode::NOT_FOUND, "Not Found");

    let (status, _) = send(
        &app,
        json_request("DELETE", "/api/v1/listings/not-a-uuid", Some(OWNER_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn browse_paginates_over_the_full_result_set() {
    let app = make_test_router();
    for i in 0..25 {
        let body = ListingInputBuilder::new()
            .title(format!("Listing number {i:02}"))
            .price(10.0 + f64::from(i))
            .json();
        create(&app, OWNER_TOKEN, body).await;
    }

    let (status, json) = send(
        &app,
        json_request("GET", "/api/v1/listings?limit=10&page=3&sort=price-low", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["listings"].as_array().unwrap().len(), 5);
    assert_eq!(json["pagination"]["total"], 25);
    assert_eq!(json["pagination"]["total_pages"], 3);
    assert_eq!(json["pagination"]["has_next"], false);
    assert_eq!(json["pagination"]["has_prev"], true);
    assert_eq!(json["listings"][0]["price"], 30.0);
}

#[tokio::test]
async fn random_sort_ignores_page_and_returns_distinct_rows() {
    let app = make_test_router();
    for i in 0..8 {
        let body = ListingInputBuilder::new().title(format!("Random pick {i}")).json();
        create(&app, OWNER_TOKEN, body).await;
    }

    let (status, json) = send(
        &app,
        json_request("GET", "/api/v1/listings?sort=random&limit=5&page=4", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listings = json["listings"].as_array().unwrap();
    assert_eq!(listings.len(), 5);
    let mut ids: Vec<&str> = listings.iter().map(|l| l["id"].as_str().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5);
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["total_pages"], 1);
    assert_eq!(json["filters"]["sort"], "random");
}

#[tokio::test]
async fn filters_are_case_insensitive_and_status_all_includes_inactive() {
    let app = make_test_router();
    create(&app, OWNER_TOKEN, ListingInputBuilder::new().title("Laptop charger").category("electronics").json()).await;
    create(
        &app,
        OWNER_TOKEN,
        ListingInputBuilder::new().title("Old headphones").category("electronics").status("inactive").json(),
    )
    .await;
    create(&app, OWNER_TOKEN, ListingInputBuilder::new().title("Winter jacket").category("clothing").json()).await;

    let (status, json) = send(&app, json_request("GET", "/api/v1/listings?category=Electronics", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["filters"]["category"], "electronics");
    assert_eq!(json["filters"]["status"], "active");

    let (status, json) = send(
        &app,
        json_request("GET", "/api/v1/listings?category=Electronics&status=all", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["total"], 2);
    assert_eq!(json["filters"]["status"], "all");
}

#[tokio::test]
async fn invalid_query_parameters_return_400() {
    let app = make_test_router();
    let (status, json) = send(
        &app,
        json_request("GET", "/api/v1/listings?limit=500&condition=broken", None, None),
    )
    .await;
    assert_error_body(status, &json, StatusCode::BAD_REQUEST, "Bad Request");
    assert_eq!(detail_fields(&json), vec!["condition", "limit"]);

    let (status, json) = send(
        &app,
        json_request("GET", "/api/v1/listings?min_price=50&max_price=10", None, None),
    )
    .await;
    assert_error_body(status, &json, StatusCode::BAD_REQUEST, "Bad Request");
    assert_eq!(detail_fields(&json), vec!["min_price"]);
}

#[tokio::test]
async fn own_listings_show_every_status() {
    let app = make_test_router();
    create(&app, OWNER_TOKEN, ListingInputBuilder::new().title("Visible bookshelf").json()).await;
    create(&app, OWNER_TOKEN, ListingInputBuilder::new().title("Paused bookshelf").status("inactive").json()).await;
    create(&app, OTHER_TOKEN, ListingInputBuilder::new().title("Other bookshelf").json()).await;

    let (status, json) = send(&app, json_request("GET", "/api/v1/listings/mine", Some(OWNER_TOKEN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["total"], 2);
    assert_eq!(json["pagination"]["limit"], 50);
}

#[tokio::test]
async fn negative_price_is_rejected_and_nothing_is_stored() {
    let app = make_test_router();
    let body = ListingInputBuilder::new().price(-5.0).json();

    let (status, json) = send(&app, json_request("POST", "/api/v1/listings", Some(OWNER_TOKEN), Some(&body))).await;
    assert_error_body(status, &json, StatusCode::BAD_REQUEST, "Bad Request");
    assert_eq!(detail_fields(&json), vec!["price"]);
    assert_eq!(json["details"][0]["value"], -5.0);

    let (_, json) = send(&app, json_request("GET", "/api/v1/listings", None, None)).await;
    assert_eq!(json["pagination"]["total"], 0);
}

#[tokio::test]
async fn non_owner_gets_403_whatever_the_update_body() {
    let app = make_test_router();
    let created = create(&app, OWNER_TOKEN, ListingInputBuilder::new().json()).await;
    let uri = format!("/api/v1/listings/{}", listing_id(&created));

    let mistyped = json!({ "title": 12345, "owner_id": "user-b" });
    for method in ["PUT", "PATCH"] {
        let (status, json) = send(&app, json_request(method, &uri, Some(OTHER_TOKEN), Some(&mistyped))).await;
        assert_error_body(status, &json, StatusCode::FORBIDDEN, "Forbidden");
    }

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri(&uri)
        .header("authorization", format!("Bearer {OTHER_TOKEN}"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"title\": "))
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_error_body(status, &json, StatusCode::FORBIDDEN, "Forbidden");
}

#[tokio::test]
async fn update_of_missing_listing_is_404_whatever_the_body() {
    let app = make_test_router();
    let uri = format!("/api/v1/listings/{}", uuid::Uuid::new_v4());

    let mistyped = json!({ "title": 12345 });
    let (status, json) = send(&app, json_request("PUT", &uri, Some(OWNER_TOKEN), Some(&mistyped))).await;
    assert_error_body(status, &json, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn owner_id_in_update_body_never_transfers_ownership() {
    let app = make_test_router();
    let created = create(&app, OWNER_TOKEN, ListingInputBuilder::new().json()).await;
    let uri = format!("/api/v1/listings/{}", listing_id(&created));
    let body = json!({ "owner_id": "user-b" });

    let (status, json) = send(&app, json_request("PUT", &uri, Some(OWNER_TOKEN), Some(&body))).await;
    assert_eq!(status, StatusCode::OK, "update failed: {json}");
    assert_eq!(json["owner_id"], "user-a");

    let (status, json) = send(&app, json_request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["owner_id"], "user-a");

    // the named user still cannot edit it
    let (status, json) = send(&app, json_request("PUT", &uri, Some(OTHER_TOKEN), Some(&body))).await;
    assert_error_body(status, &json, StatusCode::FORBIDDEN, "Forbidden");
}

#[tokio::test]
async fn mistyped_field_does_not_hide_other_violations() {
    let app = make_test_router();
    let body = json!({
        "title": 12345,
        "description": "short",
        "price": -5,
        "category": "spaceships",
        "condition": "broken",
        "contact_email": "nope",
    });

    let (status, json) = send(&app, json_request("POST", "/api/v1/listings", Some(OWNER_TOKEN), Some(&body))).await;
    assert_error_body(status, &json, StatusCode::BAD_REQUEST, "Bad Request");
    assert_eq!(
        detail_fields(&json),
        vec!["category", "condition", "contact_email", "description", "price", "title"]
    );
}

#[tokio::test]
async fn repeated_listing_is_stable_and_pages_do_not_overlap() {
    // the test clock never advances, so every row shares one created_at
    let app = make_test_router();
    for i in 0..15 {
        let body = ListingInputBuilder::new().title(format!("Same second {i:02}")).json();
        create(&app, OWNER_TOKEN, body).await;
    }

    let page_ids = |json: &Value| -> Vec<String> {
        json["listings"]
            .as_array()
            .unwrap()
            .iter()
            .map(listing_id)
            .collect()
    };

    let uri = "/api/v1/listings?limit=10&page=1";
    let (_, first) = send(&app, json_request("GET", uri, None, None)).await;
    let (_, again) = send(&app, json_request("GET", uri, None, None)).await;
    assert_eq!(page_ids(&first), page_ids(&again));

    let (status, second) = send(&app, json_request("GET", "/api/v1/listings?limit=10&page=2", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let first = page_ids(&first);
    let second = page_ids(&second);
    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 5);
    assert!(second.iter().all(|id| !first.contains(id)));
}

#[tokio::test]
async fn blank_price_bounds_are_ignored() {
    let app = make_test_router();
    create(&app, OWNER_TOKEN, ListingInputBuilder::new().json()).await;

    let (status, json) = send(
        &app,
        json_request("GET", "/api/v1/listings?min_price=&max_price=&page=", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "browse failed: {json}");
    assert_eq!(json["pagination"]["total"], 1);
}
