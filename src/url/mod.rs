//! URL handling module
//!
//! This module provides target URL validation, internal/external link
//! classification, probe target resolution, and host extraction.

mod classify;
mod domain;
mod validate;

// Re-export main functions
pub use classify::{is_internal_link, is_probe_exempt, resolve_probe_target, ProbeTarget};
pub use domain::{extract_host, link_host, same_host};
pub use validate::{validate_target_url, SUPPORTED_SCHEMES};
