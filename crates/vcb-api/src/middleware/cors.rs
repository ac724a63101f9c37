use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Environment;

/// Creates a CORS layer for the configured origins
///
/// With no origins configured, development falls back to a permissive layer
/// and production allows no cross-origin requests.
pub fn create_cors_layer(allowed_origins: &[String], environment: Environment) -> CorsLayer {
    if allowed_origins.is_empty() && environment.is_development() {
        return CorsLayer::very_permissive();
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
