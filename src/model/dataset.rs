//! Labeled training data
//!
//! Training sets are JSON arrays of `{url, anchor_text, label}` records so
//! operators can retrain without touching source.

use crate::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One labeled training example; label is 1 for relevant, 0 for not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledExample {
    pub url: String,
    pub anchor_text: String,
    pub label: u8,
}

impl LabeledExample {
    pub fn new(url: impl Into<String>, anchor_text: impl Into<String>, label: u8) -> Self {
        Self {
            url: url.into(),
            anchor_text: anchor_text.into(),
            label,
        }
    }
}

/// Loads a training set from a JSON file and validates the labels
pub fn load_training_set(path: &Path) -> ModelResult<Vec<LabeledExample>> {
    let content = std::fs::read_to_string(path)?;
    let examples: Vec<LabeledExample> = serde_json::from_str(&content)
        .map_err(|e| ModelError::Training(format!("unreadable training set: {}", e)))?;

    if examples.is_empty() {
        return Err(ModelError::Training("training set is empty".to_string()));
    }

    for (index, example) in examples.iter().enumerate() {
        if example.label > 1 {
            return Err(ModelError::Training(format!(
                "example {} has label {}, expected 0 or 1",
                index, example.label
            )));
        }
    }

    Ok(examples)
}
