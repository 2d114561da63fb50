//! Output module for presenting analysis results
//!
//! This module handles:
//! - Formatting a plain-text report of one analysis
//! - Rendering results as JSON

mod report;

pub use report::{format_json, format_report, print_report};
