//! Configuration module for the analyzer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the built-in
//! defaults, so `Config::default()` is always a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use webpage_analyzer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("analyzer.toml")).unwrap();
//! println!("Link checks run {} at a time", config.analysis.max_concurrent_link_checks);
//! ```

mod parser;
pub mod types;
mod validation;

// Re-export types
pub use types::{AnalysisConfig, Config, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
