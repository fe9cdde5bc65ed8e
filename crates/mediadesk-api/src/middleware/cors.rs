//! CORS layer configuration.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use mediadesk_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// A `"*"` entry allows any origin or header. Entries that do not parse
/// are skipped with a warning.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = match parse_list::<HeaderValue>(&config.allowed_origins, "origin") {
        Some(origins) => AllowOrigin::list(origins),
        None => AllowOrigin::from(Any),
    };
    let headers = match parse_list::<HeaderName>(&config.allowed_headers, "header") {
        Some(headers) => AllowHeaders::list(headers),
        None => AllowHeaders::from(Any),
    };
    let methods: Vec<Method> = parse_list(&config.allowed_methods, "method").unwrap_or_else(|| {
        vec![Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS]
    });

    CorsLayer::new()
        .allow_origin(origins)
        .allow_headers(headers)
        .allow_methods(methods)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

/// `None` when the list contains the `"*"` wildcard.
fn parse_list<T: FromStr>(values: &[String], what: &str) -> Option<Vec<T>> {
    if values.iter().any(|v| v.trim() == "*") {
        return None;
    }
    let parsed = values
        .iter()
        .filter_map(|v| match v.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(value = %v, "Ignoring invalid CORS {what}");
                None
            }
        })
        .collect();
    Some(parsed)
}
