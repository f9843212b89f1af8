//! News admin endpoints
//!
//! - GET   /api/admin/news/getAll       - List articles
//! - GET   /api/admin/news/getById?id=  - Fetch one article
//! - PATCH /api/admin/news/update?id=   - Update an article

use axum::{
    extract::{Query, State},
    http::Method,
    response::Response,
    routing::{get, patch},
    Extension, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, AuthToken};
use crate::api::proxy::{relay, IdQuery, JsonBody, ProxyCall, ProxyRoute};

const LIST: ProxyRoute = ProxyRoute {
    method: Method::GET,
    upstream_path: "/api/admin/news/getAll",
    failure_message: "Failed to fetch news",
};

const GET_BY_ID: ProxyRoute = ProxyRoute {
    method: Method::GET,
    upstream_path: "/api/admin/news/getById",
    failure_message: "Failed to fetch news article",
};

const UPDATE: ProxyRoute = ProxyRoute {
    method: Method::PATCH,
    upstream_path: "/api/admin/news/update",
    failure_message: "Failed to update news article",
};

/// Query parameters for the news list
#[derive(Debug, Deserialize)]
pub struct ListNewsQuery {
    #[serde(default = "default_page")]
    pub page: String,
    #[serde(default = "default_limit")]
    pub limit: String,
    #[serde(default)]
    pub search: String,
}

fn default_page() -> String {
    "1".to_string()
}

fn default_limit() -> String {
    "10".to_string()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getAll", get(list))
        .route("/getById", get(get_by_id))
        .route("/update", patch(update))
}

/// GET /api/admin/news/getAll
pub async fn list(
    State(state): State<AppState>,
    Extension(token): Extension<AuthToken>,
    Query(query): Query<ListNewsQuery>,
) -> Result<Response, ApiError> {
    let call = ProxyCall {
        token: Some(token.as_str()),
        query: vec![
            ("page".into(), query.page),
            ("limit".into(), query.limit),
            ("search".into(), query.search),
        ],
        body: None,
    };
    relay(&state, &LIST, call).await
}

/// GET /api/admin/news/getById?id=
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(token): Extension<AuthToken>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let call = ProxyCall {
        token: Some(token.as_str()),
        query: query.to_pairs(),
        body: None,
    };
    relay(&state, &GET_BY_ID, call).await
}

/// PATCH /api/admin/news/update?id=
pub async fn update(
    State(state): State<AppState>,
    Extension(token): Extension<AuthToken>,
    Query(query): Query<IdQuery>,
    JsonBody(body): JsonBody,
) -> Result<Response, ApiError> {
    let call = ProxyCall {
        token: Some(token.as_str()),
        query: query.to_pairs(),
        body: Some(&body),
    };
    relay(&state, &UPDATE, call).await
}
