//! URL handling for fiscrawl
//!
//! This module provides candidate-link validation, normalization against a
//! base URL, domain extraction, and the file-extension rule used to keep
//! terminal resources (PDFs, spreadsheets) out of crawl expansion.

mod domain;
mod normalize;

use regex::Regex;
use std::sync::OnceLock;

// Re-export main functions
pub use domain::extract_domain;
pub use normalize::normalize_link;

/// Checks whether a raw href is worth scoring at all
///
/// Rejected hrefs never reach feature extraction:
/// - empty or whitespace-only strings
/// - fragment-only references (`#`, `#section`)
/// - javascript pseudo-links (`javascript:void(0)` and friends)
///
/// # Examples
///
/// ```
/// use fiscrawl::url::is_valid_link;
///
/// assert!(is_valid_link("/finance/budget"));
/// assert!(is_valid_link("https://example.com/acfr"));
/// assert!(!is_valid_link("#site-footer"));
/// assert!(!is_valid_link("javascript:void(0)"));
/// assert!(!is_valid_link("  "));
/// ```
pub fn is_valid_link(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() {
        return false;
    }
    if href.starts_with('#') {
        return false;
    }
    if href.to_ascii_lowercase().starts_with("javascript") {
        return false;
    }
    true
}

/// Checks whether a URL points at a file-like terminal resource
///
/// A URL ending in a dot followed by 2-5 alphanumeric characters is treated
/// as a document rather than a further link source, and is excluded from
/// second-pass expansion.
///
/// # Examples
///
/// ```
/// use fiscrawl::url::is_file_link;
///
/// assert!(is_file_link("https://example.com/acfr-2024.pdf"));
/// assert!(is_file_link("https://example.com/budget.xlsx"));
/// assert!(!is_file_link("https://example.com/finance/report"));
/// ```
pub fn is_file_link(url: &str) -> bool {
    static FILE_SUFFIX: OnceLock<Regex> = OnceLock::new();
    let re = FILE_SUFFIX.get_or_init(|| {
        Regex::new(r"\.[a-zA-Z0-9]{2,5}$").unwrap_or_else(|e| panic!("bad file-suffix regex: {e}"))
    });
    re.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_relative_link() {
        assert!(is_valid_link("/departments/finance"));
    }

    #[test]
    fn test_valid_absolute_link() {
        assert!(is_valid_link("https://example.com/budget"));
    }

    #[test]
    fn test_empty_link_invalid() {
        assert!(!is_valid_link(""));
        assert!(!is_valid_link("   "));
    }

    #[test]
    fn test_fragment_only_invalid() {
        assert!(!is_valid_link("#"));
        assert!(!is_valid_link("#site-content"));
    }

    #[test]
    fn test_javascript_pseudo_links_invalid() {
        assert!(!is_valid_link("javascript:void(0)"));
        assert!(!is_valid_link("javascript:void(0);"));
        assert!(!is_valid_link("javascript"));
        assert!(!is_valid_link("JavaScript:void(0)"));
    }

    #[test]
    fn test_file_link_common_documents() {
        assert!(is_file_link("https://example.com/acfr.pdf"));
        assert!(is_file_link("https://example.com/budget.xlsx"));
        assert!(is_file_link("https://example.com/report.doc"));
        assert!(is_file_link("https://example.com/image.jpeg"));
    }

    #[test]
    fn test_non_file_link() {
        assert!(!is_file_link("https://example.com/finance/report"));
        assert!(!is_file_link("https://example.com/"));
    }

    #[test]
    fn test_file_suffix_length_bounds() {
        // One character after the dot is too short to count
        assert!(!is_file_link("https://example.com/v1.x"));
        // Six characters is too long
        assert!(!is_file_link("https://example.com/page.abcdef"));
    }

    #[test]
    fn test_dot_in_middle_of_path_not_a_file() {
        assert!(!is_file_link("https://example.com/v2.0/reports"));
    }
}
