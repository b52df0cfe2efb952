//! Relevance ranking of discovered links
//!
//! Pairs parallel URL and anchor-text lists into candidates, scores them
//! with a trained classifier, and returns them sorted by descending score.
//! The sort is stable, so equal scores keep their input order.

use crate::features::LinkCandidate;
use crate::model::RelevanceClassifier;
use crate::{FiscrawlError, Result};
use std::cmp::Ordering;

/// A link with its predicted relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLink {
    pub url: String,
    pub anchor_text: String,
    pub score: f64,
}

/// Scores and sorts links by predicted relevance, highest first
///
/// `urls` and `anchor_texts` are parallel lists; a length mismatch is an
/// input error rather than a silent truncation.
///
/// # Arguments
///
/// * `classifier` - A trained or restored classifier
/// * `urls` - Link URLs, aligned index-for-index with `anchor_texts`
/// * `anchor_texts` - Anchor text for each URL
///
/// # Returns
///
/// Scored links in descending score order, or an error when the lists
/// are misaligned or no model is loaded.
pub fn rank(
    classifier: &RelevanceClassifier,
    urls: &[String],
    anchor_texts: &[String],
) -> Result<Vec<ScoredLink>> {
    if urls.len() != anchor_texts.len() {
        return Err(FiscrawlError::InvalidInput(format!(
            "got {} urls but {} anchor texts",
            urls.len(),
            anchor_texts.len()
        )));
    }

    let candidates: Vec<LinkCandidate> = urls
        .iter()
        .zip(anchor_texts)
        .map(|(url, text)| LinkCandidate::new(url.clone(), text.clone()))
        .collect();

    let scores = classifier.score(&candidates)?;

    let mut ranked: Vec<ScoredLink> = candidates
        .into_iter()
        .zip(scores)
        .map(|(candidate, score)| ScoredLink {
            url: candidate.url,
            anchor_text: candidate.anchor_text,
            score,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    Ok(ranked)
}
