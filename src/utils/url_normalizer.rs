//! URL normalization and structural validation.
//!
//! Coerces user input into an `https://` URL and checks that the host has a
//! top-level-domain-shaped suffix. This is a shape check, not a URL grammar
//! or DNS check.

use regex::Regex;
use std::sync::LazyLock;

/// `https://`, optional `www.`, two or more dot-separated labels, then anything.
static DESTINATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://(?:www\.)?[a-zA-Z0-9][-a-zA-Z0-9]{0,62}(\.[a-zA-Z0-9][-a-zA-Z0-9]{0,62})+.*$")
        .expect("destination regex is valid")
});

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Errors that can occur during URL normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format. Must contain a top-level domain.")]
    InvalidFormat,

    /// A `Location` header cannot carry control characters.
    #[error("Invalid URL format. Must not contain control characters.")]
    ControlCharacter,
}

/// Normalizes a raw URL to its canonical `https://` form and validates it.
///
/// # Normalization Rules
///
/// 1. A leading `http://` is rewritten to `https://`
/// 2. Input without a `https://` prefix gets one prepended
/// 3. Nothing else is touched: case, path, query and fragment are kept
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] when the result has no
/// dot-separated suffix after the host or the host is malformed, and
/// [`UrlValidationError::ControlCharacter`] when the input contains an ASCII
/// control character such as `\r` or `\t`.
///
/// # Examples
///
/// ```
/// use shorty::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(
///     normalize_url("http://example.com/path").unwrap(),
///     "https://example.com/path"
/// );
/// assert!(normalize_url("nodomainhere").is_err());
/// ```
pub fn normalize_url(raw: &str) -> Result<String, UrlValidationError> {
    if raw.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let candidate = if raw.starts_with(HTTP_PREFIX) {
        raw.replacen(HTTP_PREFIX, HTTPS_PREFIX, 1)
    } else if !raw.starts_with(HTTPS_PREFIX) {
        format!("{HTTPS_PREFIX}{raw}")
    } else {
        raw.to_string()
    };

    if DESTINATION_REGEX.is_match(&candidate) {
        Ok(candidate)
    } else {
        Err(UrlValidationError::InvalidFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_domain() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
    }

    #[test]
    fn test_normalize_http_rewritten() {
        assert_eq!(
            normalize_url("http://example.com/path").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_normalize_http_rewrites_only_prefix() {
        assert_eq!(
            normalize_url("http://example.com/?next=http://other.org").unwrap(),
            "https://example.com/?next=http://other.org"
        );
    }

    #[test]
    fn test_normalize_https_unchanged() {
        assert_eq!(
            normalize_url("https://example.com/a?b=c#d").unwrap(),
            "https://example.com/a?b=c#d"
        );
    }

    #[test]
    fn test_normalize_www_prefix() {
        assert_eq!(
            normalize_url("www.rust-lang.org").unwrap(),
            "https://www.rust-lang.org"
        );
    }

    #[test]
    fn test_normalize_subdomains() {
        assert!(normalize_url("https://api.v2.example.co.uk/users").is_ok());
    }

    #[test]
    fn test_normalize_preserves_case() {
        assert_eq!(
            normalize_url("HTTPS-less.Example.COM/Path").unwrap(),
            "https://HTTPS-less.Example.COM/Path"
        );
    }

    #[test]
    fn test_normalize_port_and_path_allowed() {
        assert!(normalize_url("example.com:8080/path").is_ok());
    }

    #[test]
    fn test_reject_control_characters() {
        for raw in ["example.com/a\rb", "example.com/a\nb", "example.com/\tx", "example.com\u{7f}"] {
            assert_eq!(
                normalize_url(raw),
                Err(UrlValidationError::ControlCharacter),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_ascii_path_allowed() {
        assert_eq!(
            normalize_url("de.wikipedia.org/wiki/Köln").unwrap(),
            "https://de.wikipedia.org/wiki/Köln"
        );
    }

    #[test]
    fn test_reject_no_tld() {
        assert_eq!(
            normalize_url("nodomainhere"),
            Err(UrlValidationError::InvalidFormat)
        );
    }

    #[test]
    fn test_reject_localhost() {
        assert!(normalize_url("http://localhost:3000/test").is_err());
    }

    #[test]
    fn test_reject_empty_string() {
        assert!(normalize_url("").is_err());
    }

    #[test]
    fn test_reject_label_starting_with_hyphen() {
        assert!(normalize_url("https://-bad.com").is_err());
        assert!(normalize_url("https://good.-bad").is_err());
    }

    #[test]
    fn test_reject_label_too_long() {
        let label = "a".repeat(64);
        assert!(normalize_url(&format!("https://{label}.com")).is_err());

        let label = "a".repeat(63);
        assert!(normalize_url(&format!("https://{label}.com")).is_ok());
    }

    #[test]
    fn test_reject_other_schemes() {
        // `ftp://example.com` becomes `https://ftp://example.com`: the host
        // `ftp` has no dot-separated suffix before the colon.
        assert!(normalize_url("ftp://example.com").is_err());
        assert!(normalize_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_reject_whitespace_host() {
        assert!(normalize_url(" example.com").is_err());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_url("http://example.com/x").unwrap();
        assert_eq!(normalize_url(&once).unwrap(), once);
    }
}
