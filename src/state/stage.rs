/// Stage definitions for tracking analysis progress
///
/// This module defines the stages one page analysis moves through.
use crate::AnalyzerError;
use serde::Serialize;
use std::fmt;

/// Represents the current stage of a single page analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    // ===== Active Stages =====
    /// Target URL is being validated
    Validating,

    /// Page body is being fetched
    Fetching,

    /// Fetched body is being parsed and analyzed
    Parsing,

    /// Links are being classified and probed
    ClassifyingLinks,

    // ===== Terminal Stages =====
    /// Analysis completed and a result was produced
    Done,

    /// Analysis failed; reachable from any active stage
    Failed,
}

impl AnalysisStage {
    /// Returns true if this is a terminal stage (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if this stage may move to `next`
    ///
    /// The happy path is strictly linear:
    /// `Validating -> Fetching -> Parsing -> ClassifyingLinks -> Done`.
    /// Any active stage may move to `Failed`.
    pub fn can_transition_to(&self, next: AnalysisStage) -> bool {
        match (self, next) {
            (Self::Validating, Self::Fetching)
            | (Self::Fetching, Self::Parsing)
            | (Self::Parsing, Self::ClassifyingLinks)
            | (Self::ClassifyingLinks, Self::Done) => true,
            (current, Self::Failed) => !current.is_terminal(),
            _ => false,
        }
    }

    /// Moves to `next`, or fails with `InvalidTransition`
    pub fn transition(self, next: AnalysisStage) -> Result<AnalysisStage, AnalyzerError> {
        if self.can_transition_to(next) {
            tracing::debug!(from = %self, to = %next, "stage transition");
            Ok(next)
        } else {
            Err(AnalyzerError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Converts the stage to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::ClassifyingLinks => "classifying_links",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
