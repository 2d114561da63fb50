use serde::Deserialize;
use std::time::Duration;

/// Default timeout for fetching the analyzed page (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default timeout for a single link probe (seconds)
pub const DEFAULT_LINK_CHECK_TIMEOUT_SECS: u64 = 10;

/// Default number of link probes allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_LINK_CHECKS: usize = 10;

/// Default maximum depth for HTML tree walks
pub const DEFAULT_MAX_HTML_DEPTH: usize = 100;

/// Default maximum accepted length of a target URL
pub const DEFAULT_MAX_URL_LENGTH: usize = 2048;

/// Default cap on the fetched body size (10 MiB)
pub const DEFAULT_MAX_CONTENT_SIZE: usize = 10 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Limits and timeouts used by a single page analysis
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Timeout for fetching the analyzed page
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Timeout for each link reachability probe
    #[serde(rename = "link-check-timeout-secs")]
    pub link_check_timeout_secs: u64,

    /// Maximum number of links probed per page (None = all links)
    #[serde(rename = "max-links-to-check")]
    pub max_links_to_check: Option<usize>,

    /// Maximum number of probes in flight at once
    #[serde(rename = "max-concurrent-link-checks")]
    pub max_concurrent_link_checks: usize,

    /// Nodes deeper than this are not visited by the HTML walks
    #[serde(rename = "max-html-depth")]
    pub max_html_depth: usize,

    /// Longest accepted target URL
    #[serde(rename = "max-url-length")]
    pub max_url_length: usize,

    /// Fetched bodies are truncated to this many bytes
    #[serde(rename = "max-content-size")]
    pub max_content_size: usize,
}

impl AnalysisConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn link_check_timeout(&self) -> Duration {
        Duration::from_secs(self.link_check_timeout_secs)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            link_check_timeout_secs: DEFAULT_LINK_CHECK_TIMEOUT_SECS,
            max_links_to_check: None,
            max_concurrent_link_checks: DEFAULT_MAX_CONCURRENT_LINK_CHECKS,
            max_html_depth: DEFAULT_MAX_HTML_DEPTH,
            max_url_length: DEFAULT_MAX_URL_LENGTH,
            max_content_size: DEFAULT_MAX_CONTENT_SIZE,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the analyzer as sent to servers
    pub name: String,

    /// Version string appended to the name
    pub version: String,
}

impl UserAgentConfig {
    /// Formats the header value, e.g. `WebPageAnalyzer/1.0`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "WebPageAnalyzer".to_string(),
            version: "1.0".to_string(),
        }
    }
}
