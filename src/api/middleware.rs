//! API middleware
//!
//! Contains:
//! - Application state shared by all handlers
//! - The JSON error type every route answers with
//! - Token cookie authentication for admin routes
//! - Request statistics

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::services::MasterDataService;
use crate::upstream::UpstreamClient;

/// Name of the cookie holding the admin bearer token
pub const TOKEN_COOKIE: &str = "token";

// ============================================================================
// Request Statistics
// ============================================================================

/// Lightweight request statistics using atomic operations (no locks)
pub struct RequestStats {
    total_requests: AtomicU64,
    /// Total response time in microseconds (for calculating average)
    total_response_time_us: AtomicU64,
    start_time: Instant,
    started_at: DateTime<Utc>,
}

impl RequestStats {
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            total_response_time_us: AtomicU64::new(0),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Record a request with its response time
    pub fn record(&self, duration_us: u64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_response_time_us.fetch_add(duration_us, Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Average response time in microseconds
    pub fn avg_response_time_us(&self) -> f64 {
        let total = self.total_requests.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }
        let total_time = self.total_response_time_us.load(Ordering::Relaxed);
        total_time as f64 / total as f64
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub master_data: Arc<MasterDataService>,
    pub request_stats: Arc<RequestStats>,
}

impl AppState {
    pub fn new(upstream: UpstreamClient) -> Self {
        let upstream = Arc::new(upstream);
        Self {
            master_data: Arc::new(MasterDataService::new(upstream.clone())),
            upstream,
            request_stats: Arc::new(RequestStats::new()),
        }
    }
}

/// Bearer token taken from the request cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error response for API errors.
///
/// Serializes as `{"message": ...}`, the same shape the upstream uses, so
/// callers see one error format whether it originated here or upstream.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Generic failure; details stay in the logs
    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    /// Relay an upstream rejection with its status
    pub fn upstream(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Extract the token cookie from request headers.
///
/// An empty value counts as absent.
pub fn extract_token_cookie(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", TOKEN_COOKIE);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Admin routes: reject with 401 before anything is forwarded
pub async fn require_token(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_token_cookie(request.headers()).ok_or_else(|| {
        tracing::debug!(path = %request.uri().path(), "rejecting request without token cookie");
        ApiError::unauthorized()
    })?;

    request.extensions_mut().insert(AuthToken(token));
    Ok(next.run(request).await)
}

/// Request statistics middleware
pub async fn request_stats_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let response = next.run(request).await;

    let duration_us = start.elapsed().as_micros() as u64;
    state.request_stats.record(duration_us);

    response
}
