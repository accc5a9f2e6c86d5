// Baseline security headers on every response
//
// Same defaults a browser-facing API usually ships with: no MIME sniffing,
// no framing by other origins, no referrer leakage, HSTS for HTTPS clients.
// Handlers that set one of these themselves keep their value.

use axum::{
    http::{
        header::{
            REFERRER_POLICY, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS,
            X_DNS_PREFETCH_CONTROL, X_FRAME_OPTIONS,
        },
        HeaderName, HeaderValue,
    },
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub fn security_headers() -> [(HeaderName, HeaderValue); 5] {
    [
        (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off")),
        (
            STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        ),
    ]
}

pub fn with_security_headers(router: Router) -> Router {
    security_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(name, value))
        })
}
