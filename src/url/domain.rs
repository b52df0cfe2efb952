use url::Url;

/// Extracts the domain (host component) from a URL string
///
/// Used to derive the `domain` column of persisted rows from the
/// `scraped_from` provenance URL. The host is lowercased; a URL with no
/// host (or one that fails to parse) yields None.
///
/// # Examples
///
/// ```
/// use fiscrawl::url::extract_domain;
///
/// assert_eq!(
///     extract_domain("https://www.a2gov.org/finance"),
///     Some("www.a2gov.org".to_string())
/// );
/// assert_eq!(extract_domain("not a url"), None);
/// ```
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(|h| h.to_lowercase())
}
