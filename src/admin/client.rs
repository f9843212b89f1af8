//! HTTP client for the same-origin proxy routes
//!
//! The admin screens talk to `/api/...` on this service, never to the
//! upstream directly. The bearer token travels in an explicit
//! [`AuthContext`] and is sent as the `token` cookie the proxy reads.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{header, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::api::middleware::TOKEN_COOKIE;
use crate::models::{
    Envelope, JoinRequest, JoinRequestSubmission, MessageBody, NewsArticle, NewsUpdate, PagedList,
    QueryListParams, ReviewAction, ReviewRequest,
};

/// Errors surfaced to the admin screens
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Not authenticated")]
    Unauthenticated,
}

impl ClientError {
    /// Backend message when there is one
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show the user: the backend message, or `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}

/// Who is calling. Passed in explicitly; never read from ambient storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn cookie(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("{}={}", TOKEN_COOKIE, t))
    }
}

/// Join request operations the list screen needs
#[async_trait]
pub trait JoinRequestApi: Send + Sync {
    async fn list_join_requests(
        &self,
        query: &[(String, String)],
    ) -> Result<PagedList<JoinRequest>, ClientError>;

    async fn review_join_request(&self, action: ReviewAction, id: &str) -> Result<(), ClientError>;

    async fn delete_join_request(&self, id: &str) -> Result<(), ClientError>;
}

/// News operations the editor needs
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn get_news(&self, id: &str) -> Result<NewsArticle, ClientError>;

    async fn update_news(&self, id: &str, update: &NewsUpdate) -> Result<(), ClientError>;
}

/// Client for the proxy routes
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthContext,
}

impl AdminClient {
    pub fn new(base_url: impl Into<String>, auth: AuthContext) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<(StatusCode, Bytes), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if authenticated {
            let cookie = self.auth.cookie().ok_or(ClientError::Unauthenticated)?;
            request = request.header(header::COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        Ok((status, bytes))
    }

    /// Send and decode, requiring an envelope `status_code` of 200
    async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (status, bytes) = self.send(method, path, query, body, authenticated).await?;
        decode_envelope(status, &bytes, Acceptance::Ok)
    }
}

/// Which envelope `status_code` values count as success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Acceptance {
    /// Exactly 200
    Ok,
    /// Any 2xx, or no status code at all
    AnySuccess,
}

/// Decode a proxy reply.
///
/// Non-2xx replies and envelopes whose `status_code` is not accepted are
/// both rejections carrying the backend message.
fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
    accept: Acceptance,
) -> Result<Envelope<T>, ClientError> {
    if !status.is_success() {
        let body: MessageBody = serde_json::from_slice(bytes).unwrap_or_default();
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message: body.message,
        });
    }

    let envelope: Envelope<T> =
        serde_json::from_slice(bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
    let accepted = match accept {
        Acceptance::Ok => envelope.is_ok(),
        Acceptance::AnySuccess => envelope.is_success(),
    };
    if !accepted {
        return Err(ClientError::Rejected {
            status: envelope.status_code.unwrap_or(status.as_u16()),
            message: envelope.message,
        });
    }
    Ok(envelope)
}

impl AdminClient {
    /// GET /api/admin/queries
    pub async fn list_queries(
        &self,
        params: &QueryListParams,
    ) -> Result<PagedList<Value>, ClientError> {
        let envelope: Envelope<Vec<Value>> = self
            .call(Method::GET, "/api/admin/queries", &params.to_pairs(), None::<&Value>, true)
            .await?;
        Ok(PagedList::from(envelope))
    }

    /// POST /api/public/join-request
    ///
    /// A create may answer 201, so any 2xx envelope is a success here.
    pub async fn submit_join_request(
        &self,
        submission: &JoinRequestSubmission,
    ) -> Result<Envelope<Value>, ClientError> {
        let (status, bytes) = self
            .send(Method::POST, "/api/public/join-request", &[], Some(submission), false)
            .await?;
        decode_envelope(status, &bytes, Acceptance::AnySuccess)
    }
}

#[async_trait]
impl JoinRequestApi for AdminClient {
    async fn list_join_requests(
        &self,
        query: &[(String, String)],
    ) -> Result<PagedList<JoinRequest>, ClientError> {
        let envelope: Envelope<Vec<JoinRequest>> = self
            .call(Method::GET, "/api/admin/join-requests", query, None::<&Value>, true)
            .await?;
        Ok(PagedList::from(envelope))
    }

    async fn review_join_request(&self, action: ReviewAction, id: &str) -> Result<(), ClientError> {
        let path = format!("/api/admin/join-requests/{}", action.endpoint());
        let body = ReviewRequest { id: id.to_string() };
        self.call::<Value, _>(Method::PATCH, &path, &[], Some(&body), true)
            .await
            .map(|_| ())
    }

    async fn delete_join_request(&self, id: &str) -> Result<(), ClientError> {
        let query = [("id".to_string(), id.to_string())];
        self.call::<Value, Value>(
            Method::DELETE,
            "/api/admin/join-requests/delete",
            &query,
            None,
            true,
        )
        .await
            .map(|_| ())
    }
}

#[async_trait]
impl NewsApi for AdminClient {
    async fn get_news(&self, id: &str) -> Result<NewsArticle, ClientError> {
        let query = [("id".to_string(), id.to_string())];
        let envelope: Envelope<NewsArticle> = self
            .call(Method::GET, "/api/admin/news/getById", &query, None::<&Value>, true)
            .await?;
        envelope.data.ok_or_else(|| {
            ClientError::InvalidResponse("news article missing from response".to_string())
        })
    }

    async fn update_news(&self, id: &str, update: &NewsUpdate) -> Result<(), ClientError> {
        let query = [("id".to_string(), id.to_string())];
        self.call::<Value, _>(Method::PATCH, "/api/admin/news/update", &query, Some(update), true)
            .await
            .map(|_| ())
    }
}
