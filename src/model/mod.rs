//! Relevance classifier: training, scoring, and persistence
//!
//! The trained bundle is a fitted TF-IDF vocabulary, a standardization
//! transform, and logistic-regression weights, serialized and restored as
//! a unit so the scoring path always sees the exact transforms learned at
//! training time.

mod classifier;
mod dataset;
mod logistic;
mod scaler;

use thiserror::Error;

pub use classifier::{ClassifierModel, RelevanceClassifier, TrainReport, MODEL_SCHEMA_VERSION};
pub use dataset::{load_training_set, LabeledExample};
pub use logistic::LogisticRegression;
pub use scaler::StandardScaler;

/// Errors raised by classifier operations
#[derive(Debug, Error)]
pub enum ModelError {
    /// Scoring attempted with no trained or restored model
    #[error("No model loaded; train or restore a model first")]
    NotLoaded,

    /// Persisted model blob unreadable or schema-incompatible
    #[error("Failed to load model: {0}")]
    Load(String),

    /// Training input unusable (too few examples, single class, bad labels)
    #[error("Training failed: {0}")]
    Training(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for classifier operations
pub type ModelResult<T> = Result<T, ModelError>;
