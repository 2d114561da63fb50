use crate::UrlError;
use url::Url;

/// Schemes accepted for analysis and link probing
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

/// Validates a URL submitted for analysis
///
/// # Rules
///
/// 1. Non-empty and at most `max_length` characters
/// 2. Parseable as an absolute URL
/// 3. Has a non-empty host
/// 4. Scheme is `http` or `https`
/// 5. Hostname does not contain `..`
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The first rule the input breaks
///
/// # Examples
///
/// ```
/// use webpage_analyzer::url::validate_target_url;
///
/// assert!(validate_target_url("https://example.com", 2048).is_ok());
/// assert!(validate_target_url("not-a-valid-url", 2048).is_err());
/// assert!(validate_target_url("ftp://example.com/file", 2048).is_err());
/// ```
pub fn validate_target_url(target: &str, max_length: usize) -> Result<Url, UrlError> {
    if target.is_empty() {
        return Err(UrlError::Empty);
    }

    if target.len() > max_length {
        return Err(UrlError::TooLong { max: max_length });
    }

    let url = Url::parse(target).map_err(|e| UrlError::Parse(e.to_string()))?;

    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => return Err(UrlError::MissingHost),
    };

    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if host.contains("..") {
        return Err(UrlError::MalformedHost(host));
    }

    Ok(url)
}
