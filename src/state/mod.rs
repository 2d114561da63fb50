//! State module for tracking analysis progress
//!
//! # Components
//!
//! - `AnalysisStage`: the stage machine one page analysis moves through
//!   (validating, fetching, parsing, classifying links, done or failed)

mod stage;

pub use stage::AnalysisStage;
