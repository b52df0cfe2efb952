//! Feature extraction for link relevance scoring
//!
//! A (url, anchor text) candidate is turned into one [`FeatureVector`]
//! combining four signal families:
//!
//! - lexical: TF-IDF over the combined text ([`lexical`])
//! - fuzzy keyword affinity against the priority/non-priority lists ([`fuzzy`])
//! - semantic word-embedding magnitude ([`embedding`])
//! - structural URL path-depth weighting ([`depth`])
//!
//! Extraction is a pure function of the candidate plus the static keyword
//! and embedding state; nothing here is cached between calls.

pub mod depth;
pub mod embedding;
pub mod fuzzy;
pub mod lexical;

use crate::config::KeywordsConfig;

pub use embedding::{embedding_signal, EmbeddingError, EmbeddingTable};
pub use lexical::TfidfVectorizer;

/// A discovered (URL, anchor text) pair prior to scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub url: String,
    pub anchor_text: String,
}

impl LinkCandidate {
    pub fn new(url: impl Into<String>, anchor_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anchor_text: anchor_text.into(),
        }
    }

    /// The text every signal family operates on: URL and anchor text joined
    /// by a single space
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.url, self.anchor_text)
    }
}

/// Static keyword state shared by the fuzzy and structural signals
///
/// Both lists are case-folded once at construction so every comparison is
/// lowercase-vs-lowercase, regardless of how the config spells the terms.
#[derive(Debug, Clone)]
pub struct KeywordConfig {
    priority: Vec<String>,
    non_priority: Vec<String>,
    priority_multiplier: f64,
    non_priority_multiplier: f64,
}

impl KeywordConfig {
    pub fn new(
        priority: Vec<String>,
        non_priority: Vec<String>,
        priority_multiplier: f64,
        non_priority_multiplier: f64,
    ) -> Self {
        Self {
            priority: priority.iter().map(|k| k.to_lowercase()).collect(),
            non_priority: non_priority.iter().map(|k| k.to_lowercase()).collect(),
            priority_multiplier,
            non_priority_multiplier,
        }
    }

    pub fn from_config(config: &KeywordsConfig) -> Self {
        Self::new(
            config.priority.clone(),
            config.non_priority.clone(),
            config.priority_multiplier,
            config.non_priority_multiplier,
        )
    }

    /// Lowercased priority terms
    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Lowercased non-priority terms
    pub fn non_priority(&self) -> &[String] {
        &self.non_priority
    }

    pub fn priority_multiplier(&self) -> f64 {
        self.priority_multiplier
    }

    pub fn non_priority_multiplier(&self) -> f64 {
        self.non_priority_multiplier
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self::from_config(&KeywordsConfig::default())
    }
}

/// One candidate's features, in the exact order the classifier consumes
/// them: lexical block first, then the three scalar signals
///
/// Keeping this a named record (rather than an anonymous concatenation) is
/// what guarantees the training and scoring paths agree on layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub lexical: Vec<f64>,
    pub fuzzy_score: f64,
    pub embedding_similarity: f64,
    pub url_depth_score: f64,
}

impl FeatureVector {
    /// Flattens into the dense row the classifier operates on
    pub fn to_dense(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.lexical.len() + 3);
        row.extend_from_slice(&self.lexical);
        row.push(self.fuzzy_score);
        row.push(self.embedding_similarity);
        row.push(self.url_depth_score);
        row
    }
}

/// Converts candidates into feature vectors
///
/// Owns the static keyword and embedding state; the lexical vocabulary is
/// passed per call because it belongs to the trained model, not to the
/// extractor.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    keywords: KeywordConfig,
    embeddings: EmbeddingTable,
}

impl FeatureExtractor {
    pub fn new(keywords: KeywordConfig, embeddings: EmbeddingTable) -> Self {
        Self {
            keywords,
            embeddings,
        }
    }

    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    /// Extracts one feature vector per candidate, aligned index-for-index
    /// with the input
    pub fn extract(
        &self,
        vectorizer: &TfidfVectorizer,
        candidates: &[LinkCandidate],
    ) -> Vec<FeatureVector> {
        candidates
            .iter()
            .map(|candidate| {
                let text = candidate.combined_text();
                FeatureVector {
                    lexical: vectorizer.transform(&text),
                    fuzzy_score: fuzzy::keyword_affinity(&text, &self.keywords),
                    embedding_similarity: embedding_signal(&text, &self.embeddings),
                    url_depth_score: depth::url_depth_score(&candidate.url, &self.keywords),
                }
            })
            .collect()
    }
}
