use crate::{UrlError, UrlResult};
use url::Url;

/// Scheme used when a target carries none
pub const DEFAULT_SCHEME: &str = "http";

/// Builds the URL to request for a ranked-list target
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject an empty target
/// 2. Prefix `http://` when the target has no scheme of its own
/// 3. Parse the URL; reject if malformed
/// 4. Accept only HTTP and HTTPS schemes
/// 5. Require a host
/// 6. Remove fragment (never sent to the server)
///
/// # Arguments
///
/// * `target` - A bare host/path (`example.com/home`) or a full URL
///
/// # Returns
///
/// * `Ok(Url)` - The URL to fetch
/// * `Err(UrlError)` - The target cannot be turned into an HTTP URL
///
/// # Examples
///
/// ```
/// use site_searcher::url::request_url;
///
/// let url = request_url("wikipedia.org").unwrap();
/// assert_eq!(url.as_str(), "http://wikipedia.org/");
///
/// let url = request_url("https://example.com/about").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn request_url(target: &str) -> UrlResult<Url> {
    let target = target.trim();
    if target.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if has_scheme(target) {
        target.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, target)
    };

    let mut url =
        Url::parse(&candidate).map_err(|e| UrlError::Parse(format!("{}: {}", candidate, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingHost),
    }

    url.set_fragment(None);

    Ok(url)
}

/// Checks whether a target already starts with `<scheme>://`
///
/// A scheme is an ASCII letter followed by letters, digits, `+`, `-` or `.`.
pub fn has_scheme(target: &str) -> bool {
    let Some(end) = target.find("://") else {
        return false;
    };

    let scheme = &target[..end];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
