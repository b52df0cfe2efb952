//! Semantic word-embedding signal
//!
//! Looks candidate tokens up in a fixed pretrained embedding table
//! (GloVe-style text format), averages the vectors of the tokens found,
//! and reduces the average to a single scalar: its Euclidean norm. Tokens
//! missing from the table are skipped; a text with no known token yields 0.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading an embedding table
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Failed to read embeddings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed embeddings file at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// A fixed pretrained word-embedding table
///
/// Loaded once at startup and shared read-only by every scoring call. The
/// table is static input to the feature extractor, like the keyword lists;
/// it is not part of the persisted classifier model.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl EmbeddingTable {
    /// An empty table; the semantic signal is 0 for every candidate
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads a table from a GloVe-style text file: one word per line,
    /// followed by its whitespace-separated vector components
    ///
    /// Every line must carry the same number of components as the first.
    pub fn load(path: &Path) -> Result<Self, EmbeddingError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut table = Self::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let word = match parts.next() {
                Some(w) => w.to_string(),
                None => continue,
            };

            let components: Vec<f32> = parts
                .map(|p| {
                    p.parse::<f32>().map_err(|e| EmbeddingError::Parse {
                        line: index + 1,
                        message: format!("bad component '{}': {}", p, e),
                    })
                })
                .collect::<Result<_, _>>()?;

            if components.is_empty() {
                return Err(EmbeddingError::Parse {
                    line: index + 1,
                    message: "word with no vector components".to_string(),
                });
            }

            if table.dimension == 0 {
                table.dimension = components.len();
            } else if components.len() != table.dimension {
                return Err(EmbeddingError::Parse {
                    line: index + 1,
                    message: format!(
                        "expected {} components, found {}",
                        table.dimension,
                        components.len()
                    ),
                });
            }

            table.vectors.insert(word, components);
        }

        Ok(table)
    }

    /// Builds a table from in-memory entries; mismatched dimensions are
    /// rejected the same way `load` rejects them
    pub fn from_entries<I>(entries: I) -> Result<Self, EmbeddingError>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut table = Self::default();
        for (index, (word, components)) in entries.into_iter().enumerate() {
            if components.is_empty() {
                return Err(EmbeddingError::Parse {
                    line: index + 1,
                    message: "word with no vector components".to_string(),
                });
            }
            if table.dimension == 0 {
                table.dimension = components.len();
            } else if components.len() != table.dimension {
                return Err(EmbeddingError::Parse {
                    line: index + 1,
                    message: format!(
                        "expected {} components, found {}",
                        table.dimension,
                        components.len()
                    ),
                });
            }
            table.vectors.insert(word, components);
        }
        Ok(table)
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(|v| v.as_slice())
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// The semantic signal: Euclidean norm of the mean embedding of all known
/// tokens in the text
///
/// Tokens are lowercase whitespace-delimited words; out-of-vocabulary
/// tokens are skipped. Returns 0 when no token is found.
pub fn embedding_signal(text: &str, table: &EmbeddingTable) -> f64 {
    if table.is_empty() {
        return 0.0;
    }

    let folded = text.to_lowercase();
    let mut sum = vec![0.0_f64; table.dimension()];
    let mut found = 0usize;

    for token in folded.split_whitespace() {
        if let Some(vector) = table.get(token) {
            for (acc, &component) in sum.iter_mut().zip(vector) {
                *acc += f64::from(component);
            }
            found += 1;
        }
    }

    if found == 0 {
        return 0.0;
    }

    let count = found as f64;
    sum.iter().map(|v| (v / count).powi(2)).sum::<f64>().sqrt()
}
