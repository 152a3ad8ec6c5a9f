use super::*;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{header, Request},
};
use shared::domain::Customer;
use tower::ServiceExt;

use crate::api::{CustomerDirectory, FETCH_FAILED_MESSAGE};

struct BrokenDirectory;

#[async_trait]
impl CustomerDirectory for BrokenDirectory {
    async fn all_customers(&self) -> anyhow::Result<Vec<Customer>> {
        Err(anyhow::anyhow!("boom"))
    }
}

fn test_app(directory: Arc<dyn CustomerDirectory>) -> Router {
    let api = ApiContext {
        directory,
        response_delay: Duration::ZERO,
    };
    build_router(Arc::new(AppState { api }))
}

fn seeded_app() -> Router {
    test_app(Arc::new(StaticDirectory::from_seed().expect("seed")))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn customers_route_returns_wrapped_collection() {
    let request = Request::get("/api/customers")
        .body(Body::empty())
        .expect("request");
    let response = seeded_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let customers = json["customers"].as_array().expect("customers array");
    assert_eq!(customers.len(), 10);
    assert_eq!(customers[0]["id"], "1");
    assert_eq!(customers[0]["status"], "active");
    assert_eq!(customers[0]["joined_at"], "2024-01-15T08:30:00Z");
}

#[tokio::test]
async fn customers_route_maps_directory_fault_to_500() {
    let request = Request::get("/api/customers")
        .body(Body::empty())
        .expect("request");
    let response = test_app(Arc::new(BrokenDirectory))
        .oneshot(request)
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": FETCH_FAILED_MESSAGE })
    );
}

#[tokio::test]
async fn health_reports_ok_with_parseable_timestamp() {
    let request = Request::get("/health").body(Body::empty()).expect("request");
    let response = seeded_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_value(body_json(response).await).expect("dto");
    assert_eq!(health.status, "OK");
    assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
    assert!(health.timestamp.ends_with('Z'));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::get("/api/customers")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .expect("request");
    let response = seeded_app().oneshot(request).await.expect("response");
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let request = Request::get("/api/customers/1")
        .body(Body::empty())
        .expect("request");
    let response = seeded_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
