use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use shared::{
    error::ErrorBody,
    protocol::{CustomersResponse, HealthResponse, CUSTOMERS_ROUTE, HEALTH_ROUTE},
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{health_report, list_customers, ApiContext, StaticDirectory};
use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let directory = match &settings.customers_path {
        Some(path) => StaticDirectory::from_path(path)?,
        None => StaticDirectory::from_seed()?,
    };
    info!(customers = directory.len(), "customer data loaded");

    let api = ApiContext {
        directory: Arc::new(directory),
        response_delay: settings.response_delay(),
    };
    let app = build_router(Arc::new(AppState { api }));

    let addr = settings.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Server running on http://localhost:{}", settings.port);
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(CUSTOMERS_ROUTE, get(http_list_customers))
        .route(HEALTH_ROUTE, get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(health_report(Utc::now()))
}

async fn http_list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CustomersResponse>, (StatusCode, Json<ErrorBody>)> {
    let response = list_customers(&state.api)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(e)))?;
    Ok(Json(response))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
