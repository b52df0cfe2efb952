//! Structural URL path-depth signal
//!
//! Deeper path segments carry more weight: a priority keyword buried three
//! levels down says more about a page's purpose than one in the top-level
//! section name. Each segment at zero-based position `i` weighs `(i+1)^2`;
//! a segment containing a priority keyword adds `1.5 x weight`, one
//! containing a non-priority keyword subtracts `2.0 x weight`, and the net
//! is normalized by the segment count.

use crate::features::KeywordConfig;
use url::Url;

const PRIORITY_SEGMENT_FACTOR: f64 = 1.5;
const NON_PRIORITY_SEGMENT_FACTOR: f64 = 2.0;

/// Computes the URL-depth score for one candidate URL
///
/// Only the path is considered; scheme, host, query, and fragment are
/// stripped. A URL with no path segments (or one that does not parse)
/// scores 0. Keyword containment is case-insensitive substring matching
/// per segment.
///
/// # Examples
///
/// ```
/// use fiscrawl::features::depth::url_depth_score;
/// use fiscrawl::features::KeywordConfig;
///
/// let keywords = KeywordConfig::new(
///     vec!["budget".to_string()],
///     vec!["utility".to_string()],
///     1.2,
///     0.95,
/// );
///
/// assert!(url_depth_score("https://example.com/finance/budget/report.pdf", &keywords) > 0.0);
/// assert_eq!(url_depth_score("https://example.com", &keywords), 0.0);
/// ```
pub fn url_depth_score(url: &str, keywords: &KeywordConfig) -> f64 {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().trim_matches('/').to_string(),
        Err(_) => return 0.0,
    };

    if path.is_empty() {
        return 0.0;
    }

    let segments: Vec<&str> = path.split('/').collect();
    let mut total_bonus = 0.0;
    let mut total_penalty = 0.0;

    for (i, segment) in segments.iter().enumerate() {
        let folded = segment.to_lowercase();
        let weight = ((i + 1) as f64).powi(2);

        if keywords.priority().iter().any(|k| folded.contains(k)) {
            total_bonus += PRIORITY_SEGMENT_FACTOR * weight;
        }

        if keywords.non_priority().iter().any(|k| folded.contains(k)) {
            total_penalty += NON_PRIORITY_SEGMENT_FACTOR * weight;
        }
    }

    (total_bonus - total_penalty) / segments.len() as f64
}
