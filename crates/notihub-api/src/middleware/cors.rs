//! CORS layer configuration.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use notihub_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    layer
        .allow_methods(methods)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
