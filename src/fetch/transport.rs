//! Injectable HTTP transport
//!
//! Everything that talks to the network goes through [`Transport`], so tests
//! can substitute a fake that records calls and a deployment can wrap the
//! production client (circuit breaking, proxies) without touching the
//! analysis code.

use crate::config::UserAgentConfig;
use reqwest::header::HeaderMap;
use reqwest::{redirect::Policy, Client};
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed by the production client
pub const MAX_REDIRECTS: usize = 10;

/// Connect timeout of the production client
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues GET requests on behalf of the analyzer
///
/// Implementations must be shareable across the link-probe workers.
pub trait Transport: Send + Sync + 'static {
    /// Sends a GET request for `url`, giving up after `timeout`
    ///
    /// Returns once the status line and headers are available; the body is
    /// read incrementally through [`TransportResponse::chunk`].
    fn get(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

enum ResponseBody {
    Streaming(reqwest::Response),
    Buffered(VecDeque<Vec<u8>>),
}

/// Status, headers, and a chunked body reader
pub struct TransportResponse {
    status: u16,
    headers: HeaderMap,
    body: ResponseBody,
}

impl TransportResponse {
    /// Wraps a response from the production client
    pub fn from_reqwest(response: reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            headers: response.headers().clone(),
            body: ResponseBody::Streaming(response),
        }
    }

    /// Builds an in-memory response, delivered as a single body chunk
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::from_chunks(status, vec![body.into()])
    }

    /// Builds an in-memory response delivered chunk by chunk
    pub fn from_chunks(status: u16, chunks: Vec<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: ResponseBody::Buffered(chunks.into()),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Reads the next body chunk; `None` once the body is exhausted
    pub async fn chunk(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        match &mut self.body {
            ResponseBody::Streaming(response) => {
                let chunk = response.chunk().await?;
                Ok(chunk.map(|bytes| bytes.to_vec()))
            }
            ResponseBody::Buffered(chunks) => Ok(chunks.pop_front()),
        }
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// A failed request, before classification
///
/// Keeps the underlying error so classification can inspect the whole
/// source chain rather than only the outermost message.
#[derive(Debug)]
pub struct TransportError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl TransportError {
    /// Creates an error that carries only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error
    pub fn from_source(source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped error, if any
    pub fn inner(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner()
    }
}

impl From<reqwest::Error> for TransportError {
    /// Drops the request URL so classification only sees the failure itself
    fn from(error: reqwest::Error) -> Self {
        Self::from_source(error.without_url())
    }
}

impl From<std::io::Error> for TransportError {
    fn from(error: std::io::Error) -> Self {
        Self::from_source(error)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use webpage_analyzer::config::UserAgentConfig;
/// use webpage_analyzer::fetch::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a client built from the user agent config
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::from_client(build_http_client(config)?))
    }

    /// Wraps an already configured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await?;
        Ok(TransportResponse::from_reqwest(response))
    }
}
