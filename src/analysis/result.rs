//! Result types produced by one page analysis

use crate::links::LinkSummary;
use crate::state::AnalysisStage;
use crate::AnalyzerError;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Everything learned about one page
///
/// Built once per analysis and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// The analyzed URL, as given by the caller
    pub url: String,

    /// Detected HTML version
    pub html_version: String,

    /// Page title, empty if none
    pub title: String,

    /// Count per heading tag; only tags that occur are present
    pub headings: BTreeMap<String, usize>,

    /// Aggregated link analysis
    pub links: LinkSummary,

    /// True if a login form was detected
    pub has_login_form: bool,

    /// Wall-clock time from the start of the analysis to the end of link checking
    #[serde(rename = "load_time_ms", serialize_with = "serialize_millis")]
    pub load_time: Duration,

    /// Byte length of the fetched body, after the size cap
    pub content_length: usize,

    /// HTTP status code of the page fetch
    pub status_code: u16,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

impl AnalysisResult {
    /// Result carrying only what is known when the page fetch itself fails
    pub fn partial(url: impl Into<String>, status_code: u16, load_time: Duration) -> Self {
        Self {
            url: url.into(),
            status_code,
            load_time,
            ..Self::default()
        }
    }

    /// Total heading count across all levels
    pub fn heading_total(&self) -> usize {
        self.headings.values().sum()
    }
}

/// A failed analysis
///
/// Carries the stage the analysis failed in and, for non-2xx page fetches, a
/// partial result with the status code and elapsed time.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct AnalysisFailure {
    /// What went wrong
    #[source]
    pub error: AnalyzerError,

    /// Stage that was active when the analysis failed
    pub stage: AnalysisStage,

    /// Partial result, if any was assembled
    pub partial: Option<AnalysisResult>,
}

impl AnalysisFailure {
    pub fn new(error: AnalyzerError, stage: AnalysisStage) -> Self {
        Self {
            error,
            stage,
            partial: None,
        }
    }

    /// Attaches a partial result
    pub fn with_partial(mut self, partial: AnalysisResult) -> Self {
        self.partial = Some(partial);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_result() {
        let result = AnalysisResult::partial("https://example.com", 404, Duration::from_millis(12));
        assert_eq!(result.status_code, 404);
        assert_eq!(result.load_time, Duration::from_millis(12));
        assert!(result.title.is_empty());
        assert_eq!(result.links, LinkSummary::default());
    }

    #[test]
    fn test_json_shape() {
        let mut result = AnalysisResult::partial("https://example.com", 200, Duration::from_millis(1500));
        result.headings.insert("h1".to_string(), 2);
        result.html_version = "HTML5".to_string();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["load_time_ms"], 1500);
        assert_eq!(json["status_code"], 200);
        assert_eq!(json["html_version"], "HTML5");
        assert_eq!(json["headings"]["h1"], 2);
        assert_eq!(json["links"]["broken_links"], serde_json::json!([]));
        assert!(json.get("load_time").is_none());
    }

    #[test]
    fn test_failure_display_and_source() {
        let failure = AnalysisFailure::new(
            AnalyzerError::HttpStatus {
                code: 404,
                message: "page not found".to_string(),
            },
            AnalysisStage::Fetching,
        );
        assert_eq!(failure.to_string(), "HTTP 404: page not found");
        assert!(std::error::Error::source(&failure).is_some());
        assert!(failure.partial.is_none());
    }
}
