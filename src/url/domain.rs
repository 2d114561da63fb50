use url::Url;

/// Extracts the host from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// URLs without a host (`mailto:`, `tel:`, `data:` ...) yield None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webpage_analyzer::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_host(&url), None);
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Extracts the host of a raw `href` value, if it is an absolute URL with one
///
/// Relative references and malformed values yield None.
pub fn link_host(href: &str) -> Option<String> {
    Url::parse(href).ok().as_ref().and_then(extract_host)
}

/// Returns true if both URLs name the same host and explicit port
///
/// Hosts are compared after the `url` crate's normalization (lower-cased
/// domains), so `EXAMPLE.com` and `example.com` are the same host. A scheme's
/// default port is not considered explicit, so `http://example.com` and
/// `https://example.com` compare equal while `example.com:8080` does not.
pub fn same_host(a: &Url, b: &Url) -> bool {
    extract_host(a) == extract_host(b) && a.port() == b.port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_host(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_hostless_scheme() {
        let url = Url::parse("tel:+1234567890").unwrap();
        assert_eq!(extract_host(&url), None);
    }

    #[test]
    fn test_link_host() {
        assert_eq!(
            link_host("https://other.com/page"),
            Some("other.com".to_string())
        );
        assert_eq!(link_host("/relative"), None);
        assert_eq!(link_host("mailto:test@example.com"), None);
        assert_eq!(link_host("http://exa mple.com/"), None);
    }

    #[test]
    fn test_same_host() {
        let base = Url::parse("https://example.com/").unwrap();
        assert!(same_host(
            &base,
            &Url::parse("http://EXAMPLE.com/x").unwrap()
        ));
        assert!(!same_host(
            &base,
            &Url::parse("https://example.com:8443/").unwrap()
        ));
        assert!(!same_host(
            &base,
            &Url::parse("https://www.example.com/").unwrap()
        ));
    }
}
