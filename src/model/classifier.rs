//! The relevance classifier: feature transforms plus logistic weights,
//! trained, scored, and persisted as one bundle

use crate::features::{FeatureExtractor, LinkCandidate, TfidfVectorizer};
use crate::model::dataset::LabeledExample;
use crate::model::logistic::LogisticRegression;
use crate::model::scaler::StandardScaler;
use crate::model::{ModelError, ModelResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bumped whenever the persisted layout changes; restore rejects blobs
/// from other versions
pub const MODEL_SCHEMA_VERSION: u32 = 1;

/// Fixed seed for the train/test shuffle, so retraining on the same data
/// is reproducible
const TRAIN_SPLIT_SEED: u64 = 1;

/// Held-out fraction of the training set
const TEST_FRACTION: f64 = 0.2;

/// Opaque trained parameters: the fitted lexical vocabulary, the
/// standardization transform, and the classifier weights
///
/// Immutable once created; every scoring call reads it, none mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierModel {
    schema_version: u32,
    vectorizer: TfidfVectorizer,
    scaler: StandardScaler,
    model: LogisticRegression,
}

/// Summary of a training run
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub train_examples: usize,
    pub test_examples: usize,
    /// Accuracy on the held-out split; None when the set was too small to
    /// hold anything out
    pub test_accuracy: Option<f64>,
}

/// Scores link candidates by predicted relevance
///
/// Holds the static feature-extraction state (keywords, embeddings) and an
/// optional trained model. Scoring with no model fails with
/// [`ModelError::NotLoaded`]; nothing is ever silently defaulted.
#[derive(Debug, Clone)]
pub struct RelevanceClassifier {
    extractor: FeatureExtractor,
    model: Option<ClassifierModel>,
}

impl RelevanceClassifier {
    /// Creates a classifier with no model loaded
    pub fn new(extractor: FeatureExtractor) -> Self {
        Self {
            extractor,
            model: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Trains a model from labeled examples
    ///
    /// Fits the lexical vocabulary on the full set, extracts features,
    /// splits 80/20 with a fixed seed, standardizes using the training
    /// split only, and fits the logistic classifier. The resulting bundle
    /// replaces any previously loaded model.
    pub fn train(&mut self, examples: &[LabeledExample]) -> ModelResult<TrainReport> {
        if examples.len() < 2 {
            return Err(ModelError::Training(format!(
                "need at least 2 examples, got {}",
                examples.len()
            )));
        }

        let positives = examples.iter().filter(|e| e.label == 1).count();
        if positives == 0 || positives == examples.len() {
            return Err(ModelError::Training(
                "training set must contain both classes".to_string(),
            ));
        }

        let candidates: Vec<LinkCandidate> = examples
            .iter()
            .map(|e| LinkCandidate::new(e.url.clone(), e.anchor_text.clone()))
            .collect();
        let texts: Vec<String> = candidates.iter().map(|c| c.combined_text()).collect();

        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&texts);

        let rows: Vec<Vec<f64>> = self
            .extractor
            .extract(&vectorizer, &candidates)
            .iter()
            .map(|fv| fv.to_dense())
            .collect();
        let labels: Vec<f64> = examples.iter().map(|e| f64::from(e.label)).collect();

        // Seeded shuffle, then hold out the tail as the test split
        let mut indices: Vec<usize> = (0..examples.len()).collect();
        let mut rng = StdRng::seed_from_u64(TRAIN_SPLIT_SEED);
        indices.shuffle(&mut rng);

        let test_size = ((examples.len() as f64) * TEST_FRACTION).round() as usize;
        let train_size = examples.len() - test_size.min(examples.len() - 1);
        let (train_idx, test_idx) = indices.split_at(train_size);

        let mut train_rows: Vec<Vec<f64>> = train_idx.iter().map(|&i| rows[i].clone()).collect();
        let train_labels: Vec<f64> = train_idx.iter().map(|&i| labels[i]).collect();
        let mut test_rows: Vec<Vec<f64>> = test_idx.iter().map(|&i| rows[i].clone()).collect();
        let test_labels: Vec<f64> = test_idx.iter().map(|&i| labels[i]).collect();

        let scaler = StandardScaler::fit(&train_rows);
        scaler.transform(&mut train_rows);
        scaler.transform(&mut test_rows);

        let model = LogisticRegression::fit(&train_rows, &train_labels);

        let test_accuracy = if test_rows.is_empty() {
            None
        } else {
            let correct = test_rows
                .iter()
                .zip(&test_labels)
                .filter(|(row, &label)| {
                    let predicted = if model.predict_proba(row) >= 0.5 { 1.0 } else { 0.0 };
                    predicted == label
                })
                .count();
            Some(correct as f64 / test_rows.len() as f64)
        };

        let report = TrainReport {
            train_examples: train_rows.len(),
            test_examples: test_rows.len(),
            test_accuracy,
        };

        self.model = Some(ClassifierModel {
            schema_version: MODEL_SCHEMA_VERSION,
            vectorizer,
            scaler,
            model,
        });

        Ok(report)
    }

    /// Scores candidates, one positive-class probability per candidate in
    /// input order
    ///
    /// Applies the frozen vocabulary and standardization learned at
    /// training time; never refits anything on scoring input.
    pub fn score(&self, candidates: &[LinkCandidate]) -> ModelResult<Vec<f64>> {
        let bundle = self.model.as_ref().ok_or(ModelError::NotLoaded)?;

        let scores = self
            .extractor
            .extract(&bundle.vectorizer, candidates)
            .iter()
            .map(|fv| {
                let mut row = fv.to_dense();
                bundle.scaler.transform_row(&mut row);
                bundle.model.predict_proba(&row)
            })
            .collect();

        Ok(scores)
    }

    /// Serializes the trained bundle as an opaque blob
    pub fn persist(&self) -> ModelResult<Vec<u8>> {
        let bundle = self.model.as_ref().ok_or(ModelError::NotLoaded)?;
        serde_json::to_vec_pretty(bundle)
            .map_err(|e| ModelError::Load(format!("serialization failed: {}", e)))
    }

    /// Writes the trained bundle to a file
    pub fn persist_to(&self, path: &Path) -> ModelResult<()> {
        let blob = self.persist()?;
        std::fs::write(path, blob)?;
        Ok(())
    }

    /// Restores a previously persisted bundle, replacing any loaded model
    ///
    /// A corrupt or schema-incompatible blob fails with
    /// [`ModelError::Load`] and leaves the current model untouched.
    pub fn restore(&mut self, blob: &[u8]) -> ModelResult<()> {
        let bundle: ClassifierModel = serde_json::from_slice(blob)
            .map_err(|e| ModelError::Load(format!("unreadable model blob: {}", e)))?;

        if bundle.schema_version != MODEL_SCHEMA_VERSION {
            return Err(ModelError::Load(format!(
                "model schema version {} is incompatible with {}",
                bundle.schema_version, MODEL_SCHEMA_VERSION
            )));
        }

        let expected = bundle.vectorizer.dimension() + 3;
        if bundle.scaler.dimension() != expected || bundle.model.dimension() != expected {
            return Err(ModelError::Load(format!(
                "inconsistent model dimensions: vocabulary {} + 3 signals, scaler {}, weights {}",
                bundle.vectorizer.dimension(),
                bundle.scaler.dimension(),
                bundle.model.dimension()
            )));
        }

        self.model = Some(bundle);
        Ok(())
    }

    /// Restores a bundle from a file
    pub fn restore_from(&mut self, path: &Path) -> ModelResult<()> {
        let blob = std::fs::read(path)
            .map_err(|e| ModelError::Load(format!("{}: {}", path.display(), e)))?;
        self.restore(&blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{EmbeddingTable, KeywordConfig};

    fn training_set() -> Vec<LabeledExample> {
        vec![
            LabeledExample::new("https://city.gov/finance/budget", "Annual Budget", 1),
            LabeledExample::new("https://city.gov/finance/acfr-2024", "ACFR Report", 1),
            LabeledExample::new("https://city.gov/finance/audit-report", "Audit Report", 1),
            LabeledExample::new("https://city.gov/treasury/debt-service", "Debt Service", 1),
            LabeledExample::new("https://city.gov/finance/general-fund", "General Fund", 1),
            LabeledExample::new("https://city.gov/finance/fiscal-year", "Fiscal Year Summary", 1),
            LabeledExample::new("https://city.gov/parks/trails", "Hiking Trails", 0),
            LabeledExample::new("https://city.gov/events/music-festival", "Music Festival", 0),
            LabeledExample::new("https://city.gov/library/catalog", "Library Catalog", 0),
            LabeledExample::new("https://city.gov/police/report-crime", "Report a Crime", 0),
            LabeledExample::new("https://city.gov/utilities/pay-bill", "Pay Utility Bill", 0),
            LabeledExample::new("https://city.gov/contact", "Contact Us", 0),
        ]
    }

    fn classifier() -> RelevanceClassifier {
        RelevanceClassifier::new(FeatureExtractor::new(
            KeywordConfig::default(),
            EmbeddingTable::empty(),
        ))
    }

    #[test]
    fn test_score_without_model_fails() {
        let clf = classifier();
        let result = clf.score(&[LinkCandidate::new("https://city.gov/budget", "Budget")]);
        assert!(matches!(result, Err(ModelError::NotLoaded)));
    }

    #[test]
    fn test_persist_without_model_fails() {
        let clf = classifier();
        assert!(matches!(clf.persist(), Err(ModelError::NotLoaded)));
    }

    #[test]
    fn test_train_produces_probabilities_in_unit_interval() {
        let mut clf = classifier();
        let report = clf.train(&training_set()).unwrap();
        assert!(report.train_examples > 0);
        assert!(report.test_examples > 0);

        let scores = clf
            .score(&[
                LinkCandidate::new("https://city.gov/finance/budget-2025", "Budget 2025"),
                LinkCandidate::new("https://city.gov/parks/pool", "Swimming Pool"),
            ])
            .unwrap();

        assert_eq!(scores.len(), 2);
        for score in &scores {
            assert!((0.0..=1.0).contains(score));
        }
    }

    #[test]
    fn test_finance_scores_above_parks() {
        let mut clf = classifier();
        clf.train(&training_set()).unwrap();

        let scores = clf
            .score(&[
                LinkCandidate::new("https://city.gov/finance/annual-budget", "Annual Budget Report"),
                LinkCandidate::new("https://city.gov/parks/playgrounds", "Playgrounds"),
            ])
            .unwrap();

        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let mut clf = classifier();
        clf.train(&training_set()).unwrap();

        let candidates = vec![LinkCandidate::new("https://city.gov/finance/budget", "Budget")];
        let first = clf.score(&candidates).unwrap();
        let second = clf.score(&candidates).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_training_is_reproducible() {
        let mut a = classifier();
        let mut b = classifier();
        a.train(&training_set()).unwrap();
        b.train(&training_set()).unwrap();

        let candidates = vec![LinkCandidate::new("https://city.gov/finance/acfr", "ACFR")];
        assert_eq!(a.score(&candidates).unwrap(), b.score(&candidates).unwrap());
    }

    #[test]
    fn test_persist_restore_round_trip() {
        let mut trained = classifier();
        trained.train(&training_set()).unwrap();
        let blob = trained.persist().unwrap();

        let mut restored = classifier();
        restored.restore(&blob).unwrap();

        let candidates = vec![
            LinkCandidate::new("https://city.gov/finance/budget", "Budget"),
            LinkCandidate::new("https://city.gov/parks", "Parks"),
        ];
        assert_eq!(
            trained.score(&candidates).unwrap(),
            restored.score(&candidates).unwrap()
        );
    }

    #[test]
    fn test_restore_rejects_corrupt_blob() {
        let mut clf = classifier();
        let result = clf.restore(b"definitely not a model");
        assert!(matches!(result, Err(ModelError::Load(_))));
        assert!(!clf.is_loaded());
    }

    #[test]
    fn test_restore_rejects_wrong_schema_version() {
        let mut trained = classifier();
        trained.train(&training_set()).unwrap();
        let blob = String::from_utf8(trained.persist().unwrap()).unwrap();
        let tampered = blob.replacen("\"schema_version\": 1", "\"schema_version\": 99", 1);

        let mut clf = classifier();
        let result = clf.restore(tampered.as_bytes());
        assert!(matches!(result, Err(ModelError::Load(_))));
    }

    #[test]
    fn test_train_rejects_single_class() {
        let mut clf = classifier();
        let single_class: Vec<LabeledExample> = training_set()
            .into_iter()
            .filter(|e| e.label == 1)
            .collect();
        assert!(matches!(
            clf.train(&single_class),
            Err(ModelError::Training(_))
        ));
    }

    #[test]
    fn test_train_rejects_too_few_examples() {
        let mut clf = classifier();
        let one = vec![LabeledExample::new("https://city.gov", "Home", 0)];
        assert!(matches!(clf.train(&one), Err(ModelError::Training(_))));
    }
}
