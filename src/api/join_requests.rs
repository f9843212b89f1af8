//! Join request admin endpoints
//!
//! - GET    /api/admin/join-requests          - List with filters
//! - PATCH  /api/admin/join-requests/approve  - Approve a request
//! - PATCH  /api/admin/join-requests/reject   - Reject a request
//! - DELETE /api/admin/join-requests/delete   - Delete a request

use axum::{
    extract::{Query, State},
    http::Method,
    response::Response,
    routing::{delete, get, patch},
    Extension, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, AuthToken};
use crate::api::proxy::{relay, IdQuery, JsonBody, ProxyCall, ProxyRoute};

const LIST: ProxyRoute = ProxyRoute {
    method: Method::GET,
    upstream_path: "/api/admin/join-requests/getAll",
    failure_message: "Failed to fetch join requests",
};

const APPROVE: ProxyRoute = ProxyRoute {
    method: Method::PATCH,
    upstream_path: "/api/admin/join-requests/approve",
    failure_message: "Failed to approve join request",
};

const REJECT: ProxyRoute = ProxyRoute {
    method: Method::PATCH,
    upstream_path: "/api/admin/join-requests/reject",
    failure_message: "Failed to reject join request",
};

const DELETE: ProxyRoute = ProxyRoute {
    method: Method::DELETE,
    upstream_path: "/api/admin/join-requests/delete",
    failure_message: "Failed to delete join request",
};

/// Query parameters for the list endpoint; absent values get the
/// upstream's "no filter" defaults.
#[derive(Debug, Deserialize)]
pub struct ListJoinRequestsQuery {
    #[serde(default = "default_page")]
    pub page: String,
    #[serde(default = "default_limit")]
    pub limit: String,
    #[serde(rename = "type", default = "default_all")]
    pub kind: String,
    #[serde(default = "default_all")]
    pub status: String,
    #[serde(default)]
    pub search: String,
}

fn default_page() -> String {
    "1".to_string()
}

fn default_limit() -> String {
    "10".to_string()
}

fn default_all() -> String {
    "all".to_string()
}

impl ListJoinRequestsQuery {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("page".into(), self.page.clone()),
            ("limit".into(), self.limit.clone()),
            ("type".into(), self.kind.clone()),
            ("status".into(), self.status.clone()),
            ("search".into(), self.search.clone()),
        ]
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/approve", patch(approve))
        .route("/reject", patch(reject))
        .route("/delete", delete(remove))
}

/// GET /api/admin/join-requests
pub async fn list(
    State(state): State<AppState>,
    Extension(token): Extension<AuthToken>,
    Query(query): Query<ListJoinRequestsQuery>,
) -> Result<Response, ApiError> {
    let call = ProxyCall {
        token: Some(token.as_str()),
        query: query.to_pairs(),
        body: None,
    };
    relay(&state, &LIST, call).await
}

/// PATCH /api/admin/join-requests/approve
pub async fn approve(
    State(state): State<AppState>,
    Extension(token): Extension<AuthToken>,
    JsonBody(body): JsonBody,
) -> Result<Response, ApiError> {
    let call = ProxyCall {
        token: Some(token.as_str()),
        query: Vec::new(),
        body: Some(&body),
    };
    relay(&state, &APPROVE, call).await
}

/// PATCH /api/admin/join-requests/reject
pub async fn reject(
    State(state): State<AppState>,
    Extension(token): Extension<AuthToken>,
    JsonBody(body): JsonBody,
) -> Result<Response, ApiError> {
    let call = ProxyCall {
        token: Some(token.as_str()),
        query: Vec::new(),
        body: Some(&body),
    };
    relay(&state, &REJECT, call).await
}

/// DELETE /api/admin/join-requests/delete?id=
pub async fn remove(
    State(state): State<AppState>,
    Extension(token): Extension<AuthToken>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let call = ProxyCall {
        token: Some(token.as_str()),
        query: query.to_pairs(),
        body: None,
    };
    relay(&state, &DELETE, call).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListJoinRequestsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("type".to_string(), "all".to_string()),
                ("status".to_string(), "all".to_string()),
                ("search".to_string(), String::new()),
            ]
        );
    }
}
