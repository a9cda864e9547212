//! User input validation
//!
//! The bot only encodes inputs that look like http(s) URLs; everything
//! else gets the fixed "invalid URL" reply. Plain free text is rejected.

use lazy_regex::regex;

/// Checks whether the given text is an http(s) URL.
///
/// Matches `scheme://host.tld[/path]` where scheme is `http` or `https`,
/// the host is letters, digits, dots and dashes, the TLD is at least two
/// letters, and the optional path contains no whitespace.
///
/// Pure function: no side effects, never panics.
///
/// # Examples
/// ```
/// use qurl::core::validation::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/page"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(text: &str) -> bool {
    regex!(r"^https?://[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(/\S*)?$").is_match(text)
}
