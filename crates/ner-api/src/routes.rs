//! API route definitions
//!
//! Author: hephaex@gmail.com

use crate::handlers::{health, ner};
use crate::state::AppState;
use crate::ApiDoc;
use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// Create NER routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/ner", post(ner::ner_handler))
}

/// Create health and documentation routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
