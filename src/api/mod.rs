//! API layer - HTTP handlers and routing
//!
//! Every route is a thin proxy onto the upstream backend:
//! - Join request admin endpoints
//! - News admin endpoints
//! - Citizen query admin endpoint
//! - Public join request submission
//! - Master data option lookup
//! - Health

pub mod health;
pub mod join_requests;
pub mod middleware;
pub mod news;
pub mod proxy;
pub mod public;
pub mod queries;


use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthToken, RequestStats};

/// Build the `/api` router
pub fn build_api_router() -> Router<AppState> {
    // Admin routes: token cookie required, checked before any forwarding
    let admin_routes = Router::new()
        .nest("/admin/join-requests", join_requests::router())
        .nest("/admin/news", news::router())
        .route("/admin/queries", get(queries::list))
        .route_layer(axum_middleware::from_fn(middleware::require_token));

    Router::new()
        .route("/public/join-request", post(public::submit_join_request))
        .route("/master/options", get(public::master_options))
        .route("/health", get(health::health))
        .merge(admin_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);
    // A wildcard cannot be combined with credentials
    match cors_origin.trim() {
        "*" => tracing::warn!("wildcard CORS origin ignored, cross-origin requests disabled"),
        origin => match origin.parse::<HeaderValue>() {
            Ok(origin) => cors = cors.allow_origin(origin),
            Err(_) => {
                tracing::warn!(cors_origin, "invalid CORS origin, cross-origin requests disabled")
            }
        },
    }

    Router::new()
        .nest("/api", build_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_stats_middleware,
        ))
        .with_state(state)
}
