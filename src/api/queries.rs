//! Citizen query admin endpoint
//!
//! - GET /api/admin/queries - List with filters and sorting

use axum::{
    extract::{Query, State},
    http::Method,
    response::Response,
    Extension,
};

use crate::api::middleware::{ApiError, AppState, AuthToken};
use crate::api::proxy::{relay, ProxyCall, ProxyRoute};
use crate::models::QueryListParams;

const LIST: ProxyRoute = ProxyRoute {
    method: Method::GET,
    upstream_path: "/api/admin/queries",
    failure_message: "Failed to fetch queries",
};

/// GET /api/admin/queries
pub async fn list(
    State(state): State<AppState>,
    Extension(token): Extension<AuthToken>,
    Query(params): Query<QueryListParams>,
) -> Result<Response, ApiError> {
    let call = ProxyCall {
        token: Some(token.as_str()),
        query: params.to_pairs(),
        body: None,
    };
    relay(&state, &LIST, call).await
}
