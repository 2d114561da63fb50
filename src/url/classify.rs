//! Link classification rules
//!
//! Two independent questions are answered for each `href`:
//! whether it points inside the analyzed site, and which absolute URL (if any)
//! must be probed to learn whether it is reachable.

use crate::url::domain::same_host;
use crate::url::validate::SUPPORTED_SCHEMES;
use url::{ParseError, Url};

/// What to do with an `href` when checking reachability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeTarget {
    /// Always reachable, never probed (fragments, queries, mailto:, tel:, non-HTTP schemes)
    Exempt,
    /// Probe this absolute HTTP(S) URL
    Probe(Url),
    /// The href could not be parsed or resolved; reported as inaccessible
    Unresolvable,
}

/// Returns true for hrefs that are reachable by definition
///
/// Same-document fragments (`#top`), query-only references (`?page=2`),
/// `mailto:` and `tel:` links are never probed.
pub fn is_probe_exempt(href: &str) -> bool {
    href.starts_with('#')
        || href.starts_with('?')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
}

/// Decides whether an `href` points inside the analyzed site
///
/// # Rules
///
/// | href | result |
/// |------|--------|
/// | `#...`, `?...` | internal |
/// | `/...` | internal |
/// | relative path (no scheme, no host) | internal |
/// | absolute URL with the base's host | internal |
/// | absolute URL with another host, or none (`mailto:`) | external |
/// | malformed | external |
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webpage_analyzer::url::is_internal_link;
///
/// let base = Url::parse("https://example.com").unwrap();
/// assert!(is_internal_link("/about", &base));
/// assert!(is_internal_link("https://example.com/page", &base));
/// assert!(!is_internal_link("https://other.com/page", &base));
/// assert!(!is_internal_link("mailto:test@example.com", &base));
/// ```
pub fn is_internal_link(href: &str, base: &Url) -> bool {
    if href.starts_with('#') || href.starts_with('?') || href.starts_with('/') {
        return true;
    }

    match Url::parse(href) {
        Ok(parsed) => same_host(&parsed, base),
        // No scheme and no host: a path relative to the current page
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Resolves an `href` to the absolute URL that must be probed
///
/// Relative references are resolved against `base` with standard URL
/// reference resolution. A scheme-relative reference (`//host/path`) is kept on
/// the base's origin with the reference as its path. Absolute URLs with a
/// scheme other than HTTP(S) cannot be checked and are exempt.
pub fn resolve_probe_target(href: &str, base: &Url) -> ProbeTarget {
    if is_probe_exempt(href) {
        return ProbeTarget::Exempt;
    }

    match Url::parse(href) {
        Ok(absolute) => {
            if SUPPORTED_SCHEMES.contains(&absolute.scheme()) {
                ProbeTarget::Probe(absolute)
            } else {
                ProbeTarget::Exempt
            }
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            if href.starts_with("//") {
                let mut on_origin = base.clone();
                on_origin.set_path(href);
                on_origin.set_query(None);
                on_origin.set_fragment(None);
                ProbeTarget::Probe(on_origin)
            } else {
                match base.join(href) {
                    Ok(resolved) => ProbeTarget::Probe(resolved),
                    Err(_) => ProbeTarget::Unresolvable,
                }
            }
        }
        Err(_) => ProbeTarget::Unresolvable,
    }
}
