//! NER API - HTTP server
//!
//! Exposes the startup-selected tagger over `POST /ner`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    paths(handlers::ner::ner_handler, handlers::health::health_check),
    components(schemas(
        handlers::ner::NerForm,
        handlers::ner::NerEntity,
        handlers::ner::NerResponse,
        handlers::health::HealthResponse,
        error::ApiError
    )),
    tags(
        (name = "ner", description = "Named entity recognition"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Build the application router around the given state
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_size = state.config.server.max_body_size;

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::api_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum::middleware::from_fn(middleware::cors_headers_middleware))
}

/// Router serving the given tagger with default configuration
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_with_tagger(tagger: Arc<dyn ner_core::Tagger>) -> Router {
    let source = ner_tagger::TaggerSource::Model {
        path: std::path::PathBuf::from("test-model.json"),
    };
    let state = AppState::with_tagger(ner_core::AppConfig::default(), tagger, source);
    create_router(Arc::new(state))
}

/// Router serving the placeholder tagger, as when no model file exists
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_for_testing() -> Router {
    let loaded = ner_tagger::LoadedTagger::placeholder("missing/ner_tagger.json");
    let state = AppState::new(ner_core::AppConfig::default(), loaded);
    create_router(Arc::new(state))
}
