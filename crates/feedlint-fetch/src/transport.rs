//! The transport boundary: send a request with headers, get status + body.
//!
//! The retriever does not own TLS configuration, connection pooling, or DNS;
//! all of that lives behind this trait. [`HttpTransport`] is the production
//! implementation, [`StaticTransport`] serves canned responses for tests.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

/// One outgoing request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: RequestMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form-encoded body, POST only.
    pub body: Option<String>,
}

impl TransportRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

/// One response: status plus raw body bytes.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Generic send capability.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, FetchError>;
}

/// reqwest-backed production transport.
///
/// Timeouts are enforced by the caller (the fetcher wraps every send in the
/// effective deadline), so the client itself carries none.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, FetchError> {
        let mut builder = match request.method {
            RequestMethod::Get => self.client.get(&request.url),
            RequestMethod::Post => self.client.post(&request.url),
        };
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read response body: {e}")))?
            .to_vec();

        Ok(TransportResponse { status, body })
    }
}

/// In-memory transport serving a fixed URL → response map.
///
/// Unknown URLs answer 404, which exercises the same path a live feed's
/// missing optional documents do.
#[derive(Default)]
pub struct StaticTransport {
    responses: BTreeMap<String, TransportResponse>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(
            url.into(),
            TransportResponse {
                status: 200,
                body: body.into(),
            },
        );
        self
    }

    pub fn status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(
            url.into(),
            TransportResponse {
                status,
                body: Vec::new(),
            },
        );
        self
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, FetchError> {
        match self.responses.get(&request.url) {
            Some(response) => Ok(response.clone()),
            None => Ok(TransportResponse {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}
