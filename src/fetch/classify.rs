//! Mapping of transport failures and HTTP statuses onto analysis errors
//!
//! Transport errors are classified here, once, and travel up unchanged.

use crate::fetch::TransportError;
use crate::AnalyzerError;
use std::error::Error as StdError;
use std::io;

/// Classifies a transport failure for `url` into an [`AnalyzerError`]
///
/// The typed source chain is checked first (`reqwest` timeouts, `io::Error`
/// kinds); if it is inconclusive the lower-cased text of the whole chain is
/// matched against known message fragments.
pub fn classify_transport_error(url: &str, error: &TransportError) -> AnalyzerError {
    let url = url.to_string();

    if let Some(classified) = classify_by_type(&url, error) {
        return classified;
    }

    let text = chain_text(error);
    if text.contains("context canceled")
        || text.contains("operation was canceled")
        || text.contains("request was canceled")
    {
        return AnalyzerError::FetchCanceled { url };
    }

    classify_message(url, &text)
}

fn classify_by_type(url: &str, error: &TransportError) -> Option<AnalyzerError> {
    let mut current: Option<&(dyn StdError + 'static)> = error.inner();

    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_timeout() {
                return Some(AnalyzerError::FetchTimeout {
                    url: url.to_string(),
                });
            }
        }

        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::TimedOut => {
                    return Some(AnalyzerError::FetchTimeout {
                        url: url.to_string(),
                    })
                }
                io::ErrorKind::ConnectionRefused => {
                    return Some(AnalyzerError::ConnectionRefused {
                        url: url.to_string(),
                    })
                }
                _ => {}
            }
        }

        current = err.source();
    }

    None
}

/// Lower-cased messages of the error and every source beneath it
fn chain_text(error: &TransportError) -> String {
    let mut text = error.message().to_lowercase();
    let mut current = error.inner().and_then(|inner| inner.source());

    while let Some(err) = current {
        text.push_str(": ");
        text.push_str(&err.to_string().to_lowercase());
        current = err.source();
    }

    text
}

fn classify_message(url: String, text: &str) -> AnalyzerError {
    const DNS: [&str; 5] = [
        "no such host",
        "name resolution",
        "failed to lookup address",
        "dns error",
        "name or service not known",
    ];

    if DNS.iter().any(|needle| text.contains(needle)) {
        AnalyzerError::DnsNotFound { url }
    } else if text.contains("connection refused") {
        AnalyzerError::ConnectionRefused { url }
    } else if text.contains("network is unreachable") {
        AnalyzerError::NetworkUnreachable { url }
    } else if text.contains("timed out")
        || text.contains("timeout")
        || text.contains("deadline exceeded")
    {
        AnalyzerError::FetchTimeout { url }
    } else if text.contains("tls") || text.contains("certificate") || text.contains("ssl") {
        AnalyzerError::Tls { url }
    } else {
        AnalyzerError::Network {
            url,
            message: text.to_string(),
        }
    }
}

/// Human-readable message for a non-2xx status of the primary fetch
pub fn status_message(code: u16) -> String {
    match code {
        400 => "bad request".to_string(),
        401 => "authentication required".to_string(),
        403 => "website blocked access (likely bot protection)".to_string(),
        404 => "page not found".to_string(),
        429 => "rate limit exceeded".to_string(),
        500 | 502 | 503 | 504 => "server error".to_string(),
        other => format!("HTTP {}", other),
    }
}

/// Builds the `HttpStatus` error for a non-2xx status
pub fn status_error(code: u16) -> AnalyzerError {
    AnalyzerError::HttpStatus {
        code,
        message: status_message(code),
    }
}
