//! Webpage Analyzer: structural and content metrics for a single web page
//!
//! This crate fetches a page, walks its parsed HTML tree, and reports the
//! document version, title, heading counts, link classification with
//! reachability probing, and whether the page carries a login form.

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod dom;
pub mod fetch;
pub mod links;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for analysis operations
///
/// Transport failures are classified once, at the fetch boundary, into one of
/// the network variants below and are never re-classified further up.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("URL validation failed: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("HTML content too large ({size} bytes, max {max} bytes)")]
    ContentTooLarge { size: usize, max: usize },

    #[error("HTML content cannot be empty")]
    EmptyContent,

    #[error("connection timeout exceeded while accessing {url}")]
    FetchTimeout { url: String },

    #[error("request was canceled while accessing {url}")]
    FetchCanceled { url: String },

    #[error("domain not found: {url}")]
    DnsNotFound { url: String },

    #[error("connection refused by server: {url}")]
    ConnectionRefused { url: String },

    #[error("network is unreachable: {url}")]
    NetworkUnreachable { url: String },

    #[error("SSL/TLS error while accessing {url}")]
    Tls { url: String },

    #[error("network error while accessing {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {code}: {message}")]
    HttpStatus { code: u16, message: String },

    #[error("failed to parse HTML: {0}")]
    Parse(String),

    #[error("Invalid stage transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::AnalysisStage,
        to: state::AnalysisStage,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalyzerError {
    /// Returns true if this error came from the network layer
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::FetchTimeout { .. }
                | Self::FetchCanceled { .. }
                | Self::DnsNotFound { .. }
                | Self::ConnectionRefused { .. }
                | Self::NetworkUnreachable { .. }
                | Self::Tls { .. }
                | Self::Network { .. }
        )
    }

    /// Returns the HTTP status code carried by an `HttpStatus` error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("URL too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("invalid URL format: {0}")]
    Parse(String),

    #[error("URL must include scheme and host")]
    MissingHost,

    #[error("only [http https] schemes are supported, got: {0}")]
    InvalidScheme(String),

    #[error("invalid hostname format: {0}")]
    MalformedHost(String),
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::{AnalysisFailure, AnalysisResult, PageAnalyzer};
pub use analyzer::{HtmlAnalyzer, ParsedHtml};
pub use config::Config;
pub use fetch::{
    CircuitBreakerSettings, CircuitBreakerTransport, ReqwestTransport, Transport, TransportError,
    TransportResponse,
};
pub use links::{Link, LinkSummary};
pub use state::AnalysisStage;
pub use crate::url::{is_internal_link, validate_target_url};
