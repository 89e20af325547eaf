//! Cross-origin middleware
//!
//! The NER endpoint is called from a separately hosted front-end, so every
//! response permits any origin and allows the `Content-Type` request header.
//!
//! `CorsLayer` answers preflight requests and sets the allowed origin on all
//! responses. It only advertises allowed headers on preflight responses, so
//! `cors_headers_middleware` adds that header to everything else.
//!
//! Author: hephaex@gmail.com

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer allowing the `Content-Type` header
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Ensure every response carries the cross-origin headers
pub async fn cors_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers
        .entry(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .or_insert(HeaderValue::from_static("*"));

    headers
        .entry(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .or_insert(HeaderValue::from_static("content-type"));

    response
}
