//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the analyzer, including:
//! - The injectable [`Transport`] and its `reqwest`-backed implementation
//! - An optional circuit breaker wrapping any transport
//! - Reading response bodies up to a size cap
//! - Transport error classification
//! - Human-readable messages for non-2xx statuses

mod circuit;
mod classify;
mod transport;

pub use circuit::{CircuitBreakerSettings, CircuitBreakerTransport, CircuitState, Counts};
pub use classify::{classify_transport_error, status_error, status_message};
pub use transport::{
    build_http_client, ReqwestTransport, Transport, TransportError, TransportResponse,
    CONNECT_TIMEOUT, MAX_REDIRECTS,
};

use std::time::Duration;
use url::Url;

/// A fetched page body together with its status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code
    pub status_code: u16,

    /// Body bytes, truncated at the size cap
    pub body: Vec<u8>,

    /// True if bytes past the size cap were discarded
    pub truncated: bool,
}

impl FetchedPage {
    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Fetches `url` and reads at most `max_bytes` of its body
///
/// Non-2xx statuses are returned as a normal [`FetchedPage`]; mapping them to
/// an error is the caller's decision. Bytes past `max_bytes` are discarded
/// rather than treated as an error.
///
/// # Arguments
///
/// * `transport` - The transport to send the request through
/// * `url` - The URL to fetch
/// * `timeout` - Per-request timeout handed to the transport
/// * `max_bytes` - Body size cap
pub async fn fetch_page<T: Transport>(
    transport: &T,
    url: &Url,
    timeout: Duration,
    max_bytes: usize,
) -> Result<FetchedPage, TransportError> {
    let mut response = transport.get(url, timeout).await?;
    let status_code = response.status();

    let mut body = Vec::new();
    let mut truncated = false;

    while let Some(chunk) = response.chunk().await? {
        let remaining = max_bytes - body.len();
        if chunk.len() > remaining {
            body.extend_from_slice(&chunk[..remaining]);
            truncated = true;
            break;
        }
        body.extend_from_slice(&chunk);
    }

    if truncated {
        tracing::debug!(url = %url, max_bytes, "response body truncated at size cap");
    }

    Ok(FetchedPage {
        status_code,
        body,
        truncated,
    })
}
