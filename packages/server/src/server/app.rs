//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::{
    jwt_auth_middleware, with_rate_limit, with_security_headers, RateLimit,
};
use crate::server::routes::{
    create_resource_handler, create_review_handler, health_handler, list_reviews_handler,
    login_handler, me_handler, recommend_resource_handler, search_resources_handler,
    signup_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// An empty `allowed_origins` list allows any origin (development).
/// `rate_limit` applies per client IP to the /api routes only.
pub fn build_app(deps: ServerDeps, allowed_origins: &[String], rate_limit: RateLimit) -> Router {
    let jwt_service = deps.jwt_service.clone();
    let app_state = AxumAppState {
        deps: Arc::new(deps),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let api = Router::new()
        .route(
            "/resources",
            get(search_resources_handler).post(create_resource_handler),
        )
        .route("/resources/:id/recommend", post(recommend_resource_handler))
        // Older clients still call the pre-rename endpoint
        .route("/resources/:id/like", post(recommend_resource_handler))
        .route("/resources/:id/reviews", get(list_reviews_handler))
        .route("/reviews", post(create_review_handler))
        .route("/users/signup", post(signup_handler))
        .route("/users/login", post(login_handler))
        .route("/users/me", get(me_handler));
    let api = with_rate_limit(api, rate_limit);

    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors);

    with_security_headers(app).layer(TraceLayer::new_for_http())
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.is_empty() {
        return AllowOrigin::from(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
