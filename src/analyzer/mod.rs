//! HTML analyzer: extracts page metrics from a parse tree
//!
//! This module handles walking a parsed document to extract:
//! - The HTML version (DOCTYPE table, then an HTML5 feature heuristic)
//! - The page title
//! - Heading counts (`h1`..`h6`)
//! - Raw `<a href>` values for link classification
//! - Whether the page carries a login form
//!
//! Every walk that visits the whole document is bounded by the configured
//! maximum depth.

mod extract;
pub mod keywords;
mod login;
mod version;

pub use extract::{extract_headings, extract_links, extract_title};
pub use login::has_login_form;
pub use version::{detect_version, match_doctype};

use crate::config::types::{DEFAULT_MAX_CONTENT_SIZE, DEFAULT_MAX_HTML_DEPTH};
use crate::config::AnalysisConfig;
use crate::dom::{parse_document, DomNode};
use crate::AnalyzerError;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Information extracted from an HTML page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedHtml {
    /// Detected HTML version (e.g. "HTML 4.01 Strict", "HTML5")
    pub html_version: String,

    /// Page title, empty if none
    pub title: String,

    /// Count per heading tag; only tags that occur are present
    pub headings: BTreeMap<String, usize>,

    /// Raw `href` values of all anchors, in document order
    pub links: Vec<String>,

    /// True if a login form was detected
    pub has_login_form: bool,

    /// Length of the analyzed content in bytes
    pub content_length: usize,

    /// URL that relative links are resolved against
    #[serde(serialize_with = "serialize_url")]
    pub base_url: Url,
}

fn serialize_url<S: serde::Serializer>(url: &Url, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(url.as_str())
}

/// Parses HTML content and extracts page metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlAnalyzer {
    max_depth: usize,
    max_content_size: usize,
}

impl Default for HtmlAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HTML_DEPTH, DEFAULT_MAX_CONTENT_SIZE)
    }
}

impl HtmlAnalyzer {
    /// Creates an analyzer with explicit limits
    pub fn new(max_depth: usize, max_content_size: usize) -> Self {
        Self {
            max_depth,
            max_content_size,
        }
    }

    /// Creates an analyzer from the analysis configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.max_html_depth, config.max_content_size)
    }

    /// Parses HTML content and extracts page metrics
    ///
    /// # Arguments
    ///
    /// * `content` - The HTML content to analyze
    /// * `base_url` - Absolute URL of the page, used for link resolution
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedHtml)` - Extracted metrics
    /// * `Err(AnalyzerError::EmptyContent)` - `content` is empty
    /// * `Err(AnalyzerError::ContentTooLarge)` - `content` exceeds the size cap
    /// * `Err(AnalyzerError::Parse)` - `base_url` is not an absolute URL
    ///
    /// # Example
    ///
    /// ```
    /// use webpage_analyzer::analyzer::HtmlAnalyzer;
    ///
    /// let html = r#"<!DOCTYPE html><html><head><title>Test</title></head>
    ///     <body><h1>Hi</h1><a href="/page">Link</a></body></html>"#;
    /// let parsed = HtmlAnalyzer::default().parse(html, "https://example.com/").unwrap();
    /// assert_eq!(parsed.title, "Test");
    /// assert_eq!(parsed.headings.get("h1"), Some(&1));
    /// assert_eq!(parsed.links, vec!["/page".to_string()]);
    /// ```
    pub fn parse(&self, content: &str, base_url: &str) -> Result<ParsedHtml, AnalyzerError> {
        if content.is_empty() {
            return Err(AnalyzerError::EmptyContent);
        }

        if content.len() > self.max_content_size {
            return Err(AnalyzerError::ContentTooLarge {
                size: content.len(),
                max: self.max_content_size,
            });
        }

        let base_url = Url::parse(base_url)
            .map_err(|e| AnalyzerError::Parse(format!("invalid base URL '{}': {}", base_url, e)))?;

        let document = parse_document(content);
        Ok(self.analyze_tree(document.root(), base_url, content.len()))
    }

    /// Extracts page metrics from an already-parsed tree
    pub fn analyze_tree<'a, N: DomNode<'a>>(
        &self,
        root: N,
        base_url: Url,
        content_length: usize,
    ) -> ParsedHtml {
        let parsed = ParsedHtml {
            html_version: detect_version(root, self.max_depth).to_string(),
            title: extract_title(root),
            headings: extract_headings(root, self.max_depth),
            links: extract_links(root, self.max_depth),
            has_login_form: has_login_form(root, self.max_depth),
            content_length,
            base_url,
        };

        tracing::debug!(
            version = %parsed.html_version,
            links = parsed.links.len(),
            login_form = parsed.has_login_form,
            "parsed HTML"
        );

        parsed
    }
}
