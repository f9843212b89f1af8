//! Public endpoints
//!
//! - POST /api/public/join-request - Submit a join request (no token)
//! - GET  /api/master/options      - Resolve a master data option list

use axum::{
    extract::{Query, State},
    http::Method,
    response::Response,
    Json,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::proxy::{relay, JsonBody, ProxyCall, ProxyRoute};
use crate::models::{
    missing_submission_fields, Envelope, TypeOption, ENVELOPE_OK, NEWS_TYPE_CATEGORY,
};

const SUBMIT_JOIN_REQUEST: ProxyRoute = ProxyRoute {
    method: Method::POST,
    upstream_path: "/api/public/join-request/create",
    failure_message: "Failed to submit join request",
};

/// POST /api/public/join-request
///
/// Required fields are checked locally; the body is forwarded unchanged.
pub async fn submit_join_request(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Response, ApiError> {
    let missing = missing_submission_fields(&body);
    if !missing.is_empty() {
        tracing::debug!(?missing, "join request submission incomplete");
        return Err(ApiError::validation_error("All required fields must be provided"));
    }

    let call = ProxyCall {
        token: None,
        query: Vec::new(),
        body: Some(&body),
    };
    relay(&state, &SUBMIT_JOIN_REQUEST, call).await
}

/// Query parameters for option lookups
#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    #[serde(default = "default_code")]
    pub code: String,
}

fn default_code() -> String {
    NEWS_TYPE_CATEGORY.to_string()
}

/// GET /api/master/options?code=
///
/// Never fails: an unresolvable code yields an empty list.
pub async fn master_options(
    State(state): State<AppState>,
    Query(query): Query<OptionsQuery>,
) -> Json<Envelope<Vec<TypeOption>>> {
    let options = state.master_data.type_options_or_empty(&query.code).await;
    Json(Envelope {
        status_code: Some(ENVELOPE_OK),
        data: Some(options),
        message: None,
        pagination: None,
    })
}
