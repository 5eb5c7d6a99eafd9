use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;

/// A raw response from the origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Body decoded as UTF-8, invalid sequences replaced
    pub body: String,
    /// Number of body bytes received on the wire
    pub received: u64,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        HttpResponse {
            status,
            received: body.len() as u64,
            body,
        }
    }

    /// Build a response from raw body bytes
    pub fn from_bytes(status: u16, bytes: &[u8]) -> Self {
        HttpResponse {
            status,
            body: String::from_utf8_lossy(bytes).into_owned(),
            received: bytes.len() as u64,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a single origin request produced nothing usable.
///
/// Logged and then collapsed into an absence signal by the directory
/// service; callers above the service never see it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// Issues GET requests against the origin
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a URL. Non-success statuses are returned as responses, only
    /// connection-level failures are errors.
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError>;
}

/// Production transport backed by a shared reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default client settings (no extra timeouts)
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("httpsh/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError> {
        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = self.client.get(url).send().await.map_err(transport_error)?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await.map_err(transport_error)?;

        Ok(HttpResponse::from_bytes(status, &bytes))
    }
}
