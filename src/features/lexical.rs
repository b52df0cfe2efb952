//! TF-IDF lexical vectorizer
//!
//! Term-frequency / inverse-document-frequency over 1-3 word n-grams of
//! the combined `url + " " + anchor_text` string, English stop-words
//! removed, vocabulary capped at 500 dimensions. The vocabulary is fit
//! once during training and reused unchanged at scoring time; refitting on
//! scoring input would make scores incomparable across calls.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Vocabulary cap
const MAX_FEATURES: usize = 500;

/// Common English stop-words, excluded from the vocabulary
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "you", "your", "yours",
];

/// Fit-once TF-IDF vectorizer over word n-grams
///
/// The fitted state (vocabulary and idf weights) serializes as part of the
/// classifier model blob so scoring always uses the exact transform
/// learned at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    ngram_min: usize,
    ngram_max: usize,
    max_features: usize,
    /// term -> column index; BTreeMap keeps serialization deterministic
    vocabulary: BTreeMap<String, usize>,
    /// idf weight per column, aligned with vocabulary indices
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Creates an unfitted vectorizer with the standard settings
    /// (1-3 grams, 500-term vocabulary cap)
    pub fn new() -> Self {
        Self {
            ngram_min: 1,
            ngram_max: 3,
            max_features: MAX_FEATURES,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    /// Number of columns a transformed row will have
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// True once `fit` has built a vocabulary
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Fits the vocabulary and idf weights on a training corpus
    ///
    /// Terms are capped at `max_features` by total corpus count
    /// (alphabetical tie-break), then indexed in alphabetical order.
    /// Idf uses the smoothed form `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit(&mut self, documents: &[String]) {
        let mut corpus_count: HashMap<String, u64> = HashMap::new();
        let mut doc_freq: HashMap<String, u64> = HashMap::new();

        for doc in documents {
            let terms = self.analyze(doc);
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *corpus_count.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        // Keep the max_features most frequent terms, ties alphabetical
        let mut ranked: Vec<(String, u64)> = corpus_count.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        self.vocabulary = BTreeMap::new();
        self.idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = *doc_freq.get(&term).unwrap_or(&0) as f64;
            self.idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            self.vocabulary.insert(term, index);
        }
    }

    /// Transforms one document into a dense l2-normalized tf-idf row using
    /// the frozen vocabulary
    ///
    /// Terms outside the vocabulary are ignored; an unfitted vectorizer
    /// yields an empty row.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.vocabulary.len()];
        for term in self.analyze(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                row[index] += self.idf[index];
            }
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut row {
                *v /= norm;
            }
        }
        row
    }

    /// Splits a document into lowercase word tokens (length >= 2, stop-words
    /// removed) and expands them into n-grams
    fn analyze(&self, document: &str) -> Vec<String> {
        let tokens: Vec<String> = document
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() >= 2)
            .filter(|t| !STOP_WORDS.contains(t))
            .map(|t| t.to_string())
            .collect();

        let mut terms = Vec::new();
        for n in self.ngram_min..=self.ngram_max {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
