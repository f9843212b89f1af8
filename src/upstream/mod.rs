//! Upstream REST backend client
//!
//! One shared `reqwest` client issues exactly one request per call. There
//! are no retries and no caching; a timeout only applies when configured.

use axum::http::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::UpstreamConfig;

/// Errors talking to the upstream
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Upstream returned a non-JSON body (status {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("Upstream rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// A request to forward
#[derive(Debug, Clone)]
pub struct UpstreamRequest<'a> {
    pub method: Method,
    pub path: &'a str,
    pub query: Vec<(String, String)>,
    pub token: Option<&'a str>,
    pub body: Option<&'a Value>,
}

impl<'a> UpstreamRequest<'a> {
    pub fn new(method: Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            token: None,
            body: None,
        }
    }

    pub fn get(path: &'a str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_token(mut self, token: Option<&'a str>) -> Self {
        self.token = token;
        self
    }

    pub fn with_body(mut self, body: Option<&'a Value>) -> Self {
        self.body = body;
        self
    }
}

/// Status and parsed JSON body of an upstream reply
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The `message` field of the body, if it is a non-empty string
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }
}

/// Client for the upstream base URL
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path under the base
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Forward a request and parse the reply body as JSON.
    ///
    /// Non-2xx statuses are returned as replies, not errors; only transport
    /// failures and unparseable bodies fail.
    pub async fn send(&self, request: UpstreamRequest<'_>) -> Result<UpstreamReply, UpstreamError> {
        let url = self.url(request.path);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, %url, "forwarding to upstream");

        let response = builder.send().await.map_err(|source| UpstreamError::Transport {
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Transport { url, source })?;
        let body = serde_json::from_slice(&bytes).map_err(|source| UpstreamError::InvalidBody {
            status: status.as_u16(),
            source,
        })?;

        Ok(UpstreamReply { status, body })
    }

    /// GET a path and decode a successful reply into `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, UpstreamError> {
        let reply = self.send(UpstreamRequest::get(path).with_query(query)).await?;
        if !reply.is_success() {
            return Err(UpstreamError::Rejected {
                status: reply.status.as_u16(),
                message: reply.message().unwrap_or("Upstream request failed").to_string(),
            });
        }
        serde_json::from_value(reply.body).map_err(|source| UpstreamError::InvalidBody {
            status: reply.status.as_u16(),
            source,
        })
    }
}
