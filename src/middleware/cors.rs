//! CORS policy for browser clients.
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config (`CORS_ALLOWED_ORIGINS`), WITHOUT credentials.
//!   An empty allowlist allows no origin at all.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

fn layer(config: &Config) -> CorsLayer {
    let cors = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _req| allowed.iter().any(|v| v == origin),
        ))
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    // Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static("x-request-id"),
    ])
    .max_age(Duration::from_secs(60 * 10))
}

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}
