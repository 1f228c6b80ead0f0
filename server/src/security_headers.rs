//! Adds response hardening headers.
//!
//! sipd only ever serves JSON, but clients should not be left to sniff that
//! out for themselves.
use axum::{
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tower_http::cors::CorsLayer;

const DEFAULT_HEADERS: [(header::HeaderName, HeaderValue); 2] = [
    (
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    ),
    (header::X_FRAME_OPTIONS, HeaderValue::from_static("deny")),
];

pub(crate) async fn headers(request: axum::extract::Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in DEFAULT_HEADERS {
        headers.entry(name).or_insert(value);
    }
    response
}

pub(crate) fn cors() -> CorsLayer {
    CorsLayer::new()
}
