//! Logistic-regression classifier
//!
//! Full-batch gradient descent over standardized features, capped at 500
//! iterations. Scoring reads the positive-class probability straight from
//! the sigmoid; there is no randomness on the scoring path.

use serde::{Deserialize, Serialize};

/// Optimization cap
pub const MAX_ITERATIONS: usize = 500;

const LEARNING_RATE: f64 = 0.1;
const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Trained logistic-regression weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Fits weights on standardized rows with 0/1 labels
    ///
    /// Descends the mean log-loss gradient until the largest parameter
    /// update falls below tolerance or the iteration cap is reached.
    pub fn fit(rows: &[Vec<f64>], labels: &[f64]) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);

        let mut weights = vec![0.0; n_cols];
        let mut bias = 0.0;

        for _ in 0..MAX_ITERATIONS {
            let mut weight_grad = vec![0.0; n_cols];
            let mut bias_grad = 0.0;

            for (row, &label) in rows.iter().zip(labels) {
                let error = sigmoid(dot(&weights, row) + bias) - label;
                for (g, v) in weight_grad.iter_mut().zip(row) {
                    *g += error * v;
                }
                bias_grad += error;
            }

            let scale = LEARNING_RATE / n_rows.max(1) as f64;
            let mut max_step = 0.0_f64;
            for (w, g) in weights.iter_mut().zip(&weight_grad) {
                let step = scale * g;
                *w -= step;
                max_step = max_step.max(step.abs());
            }
            let bias_step = scale * bias_grad;
            bias -= bias_step;
            max_step = max_step.max(bias_step.abs());

            if max_step < CONVERGENCE_TOLERANCE {
                break;
            }
        }

        Self { weights, bias }
    }

    /// Positive-class probability for one standardized row
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, row) + self.bias)
    }

    /// Number of features the model was fit on
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(z: f64) -> f64 {
    // Clamp to keep exp() well-behaved on extreme inputs
    let z = z.clamp(-500.0, 500.0);
    1.0 / (1.0 + (-z).exp())
}
