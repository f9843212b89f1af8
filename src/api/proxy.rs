//! Upstream proxy
//!
//! Every `/api/...` handler forwards to the upstream through [`relay`]:
//! 1. Builds the upstream URL from the configured base, a fixed path and
//!    the forwarded query parameters
//! 2. Sends the same method with a JSON content type and, for admin routes,
//!    the bearer token from the cookie
//! 3. Relays a 2xx body unchanged with the upstream status
//! 4. Turns a non-2xx reply into `{"message"}` with the upstream status
//! 5. Maps transport and parse failures to a generic 500

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{ApiError, AppState};
use crate::upstream::UpstreamRequest;

/// A fixed upstream endpoint and how failures on it are reported
#[derive(Debug, Clone)]
pub struct ProxyRoute {
    pub method: Method,
    pub upstream_path: &'static str,
    /// Message used when the upstream rejects without one
    pub failure_message: &'static str,
}

/// What one incoming request contributes to the forwarded call
#[derive(Debug, Default)]
pub struct ProxyCall<'a> {
    pub token: Option<&'a str>,
    pub query: Vec<(String, String)>,
    pub body: Option<&'a Value>,
}

/// Forward one request upstream and translate the reply.
///
/// Exactly one upstream call is made.
pub async fn relay(
    state: &AppState,
    route: &ProxyRoute,
    call: ProxyCall<'_>,
) -> Result<Response, ApiError> {
    let request = UpstreamRequest::new(route.method.clone(), route.upstream_path)
        .with_query(call.query)
        .with_token(call.token)
        .with_body(call.body);

    let reply = state.upstream.send(request).await.map_err(|e| {
        tracing::error!(path = route.upstream_path, error = %e, "upstream call failed");
        ApiError::internal_error()
    })?;

    if !reply.is_success() {
        let message = reply.message().unwrap_or(route.failure_message).to_string();
        tracing::warn!(
            path = route.upstream_path,
            status = reply.status.as_u16(),
            %message,
            "upstream rejected request"
        );
        return Err(ApiError::upstream(reply.status, message));
    }

    Ok((reply.status, Json(reply.body)).into_response())
}

/// `?id=` parameter of single-record routes
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl IdQuery {
    /// The id as a forwarded query pair, when present
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.id
            .iter()
            .map(|id| ("id".to_string(), id.clone()))
            .collect()
    }
}

/// Any JSON request body.
///
/// Unlike `axum::Json`, this ignores the content type and rejects with the
/// API's own `{"message"}` error shape.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "failed to read request body");
            ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body")
        })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|_| ApiError::validation_error("Invalid JSON body"))
    }
}
