//! URL normalization helpers
//!
//! Discovery accepts loose input ("example.com", "https://example.com/sitemap.xml",
//! a robots.txt `Sitemap:` value with stray whitespace) and needs it pinned
//! down to a parsed [`Url`] before any fetch happens.

use crate::UrlError;
use url::Url;

/// Normalizes a user- or document-supplied URL string
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. If the input already carries an http/https scheme, parse it as-is
/// 3. Otherwise try prefixing `https://`, falling back to `http://`
///
/// # Arguments
///
/// * `input` - The raw URL or bare domain string
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Neither scheme produced a valid URL
///
/// # Examples
///
/// ```
/// use sitelens::url::normalize_input;
///
/// let url = normalize_input("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn normalize_input(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Parse {
            input: input.to_string(),
            reason: "empty input".to_string(),
        });
    }

    if trimmed.contains("://") {
        return parse_checked(trimmed);
    }

    // Bare domain or path: prefer https, fall back to http
    match parse_checked(&format!("https://{}", trimmed)) {
        Ok(url) => Ok(url),
        Err(_) => parse_checked(&format!("http://{}", trimmed)),
    }
}

/// Parses a URL and verifies it has an http(s) scheme and a host
fn parse_checked(candidate: &str) -> Result<Url, UrlError> {
    let url = Url::parse(candidate).map_err(|e| UrlError::Parse {
        input: candidate.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(candidate.to_string()));
    }

    Ok(url)
}

/// Returns the origin of a URL as `scheme://host[:port]`
///
/// Used to build the robots.txt and common-path probe URLs.
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}
