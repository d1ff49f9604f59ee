//! Security-related response headers, applied to every response
//! unless a handler already set them.

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

const HEADERS: [(&str, &str); 5] = [
    // Clickjacking protection (legacy + modern)
    ("x-frame-options", "DENY"),
    ("content-security-policy", "frame-ancestors 'none'"),
    // Prevent MIME sniffing
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "no-referrer"),
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
];

pub fn apply(router: Router) -> Router {
    HEADERS.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}
