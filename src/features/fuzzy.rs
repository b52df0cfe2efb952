//! Fuzzy keyword affinity signal
//!
//! Scores a candidate's text against the priority and non-priority keyword
//! lists using partial fuzzy similarity: how well a keyword matches the
//! best-aligned substring of the text, on a 0-100 scale. The best priority
//! match is reinforced by the priority multiplier, the best non-priority
//! match is subtracted after scaling by the non-priority multiplier, and
//! the net value may be negative.

use crate::features::KeywordConfig;

/// Partial fuzzy similarity between two strings on a 0-100 scale
///
/// The shorter string slides over every same-length window of the longer
/// one; the result is the best window's Levenshtein similarity. A perfect
/// substring match scores 100 regardless of the length difference. Either
/// string being empty scores 0.
///
/// # Examples
///
/// ```
/// use fiscrawl::features::fuzzy::partial_ratio;
///
/// assert_eq!(partial_ratio("annual budget report", "budget"), 100.0);
/// assert_eq!(partial_ratio("budget", "budget"), 100.0);
/// assert_eq!(partial_ratio("anything", ""), 0.0);
/// ```
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    let short_str: String = short.iter().collect();
    let window_len = short.len();

    let mut best = 0.0_f64;
    for window in long.windows(window_len) {
        let window_str: String = window.iter().collect();
        let distance = strsim::levenshtein(&short_str, &window_str) as f64;
        let similarity = (1.0 - distance / window_len as f64) * 100.0;
        if similarity > best {
            best = similarity;
        }
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Net fuzzy keyword score for a candidate text
///
/// `max(partial_ratio vs priority) * priority_multiplier
///  - max(partial_ratio vs non_priority) * non_priority_multiplier`
///
/// The text is folded to lowercase; the keyword lists are already folded
/// at construction. A text with no resemblance to either list scores 0.
pub fn keyword_affinity(text: &str, keywords: &KeywordConfig) -> f64 {
    let folded = text.to_lowercase();

    let best_priority = keywords
        .priority()
        .iter()
        .map(|keyword| partial_ratio(&folded, keyword))
        .fold(0.0_f64, f64::max);

    let best_penalty = keywords
        .non_priority()
        .iter()
        .map(|keyword| partial_ratio(&folded, keyword))
        .fold(0.0_f64, f64::max);

    best_priority * keywords.priority_multiplier()
        - best_penalty * keywords.non_priority_multiplier()
}
