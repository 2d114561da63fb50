//! Page analysis orchestration
//!
//! [`PageAnalyzer::analyze_url`] is the entry point: it walks one page through
//! the [`AnalysisStage`](crate::state::AnalysisStage) machine and returns either
//! an [`AnalysisResult`] or an [`AnalysisFailure`].

mod coordinator;
mod result;

pub use coordinator::PageAnalyzer;
pub use result::{AnalysisFailure, AnalysisResult};
