use crate::UrlError;
use url::Url;

/// Normalizes a discovered href against the page it was found on
///
/// # Normalization Steps
///
/// 1. Resolve the href against the base URL (relative paths, `..`, etc.)
/// 2. Collapse runs of duplicate slashes, except the `//` after the scheme
/// 3. Strip any trailing slash
///
/// Normalization is deliberately light: it makes URLs comparable for
/// deduplication without rewriting hosts or query strings, so the stored
/// URL stays clickable exactly as the site published it.
///
/// # Arguments
///
/// * `href` - The raw href attribute from an anchor tag
/// * `base` - The URL of the page the href was found on
///
/// # Returns
///
/// * `Ok(String)` - Normalized absolute URL
/// * `Err(UrlError)` - The base is unparseable or the join failed
///
/// # Examples
///
/// ```
/// use fiscrawl::url::normalize_link;
///
/// let url = normalize_link("/budget/", "https://example.com/finance").unwrap();
/// assert_eq!(url, "https://example.com/budget");
/// ```
pub fn normalize_link(href: &str, base: &str) -> Result<String, UrlError> {
    let base_url = Url::parse(base).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

    let joined = base_url
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    let collapsed = collapse_duplicate_slashes(joined.as_str());

    Ok(collapsed.trim_end_matches('/').to_string())
}

/// Collapses runs of `/` into a single slash, keeping the `//` that follows
/// a scheme separator (`https://`) intact
fn collapse_duplicate_slashes(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c == '/' && out.ends_with('/') {
            // Keep the second slash of "://"; drop everything else
            let before_run: String = out.trim_end_matches('/').to_string();
            if !before_run.ends_with(':') {
                continue;
            }
            if out.ends_with("//") {
                continue;
            }
        }
        out.push(c);
    }
    out
}
