//! Feature standardization (zero mean, unit variance)
//!
//! Fit on training rows only; the same means and deviations are then
//! frozen into the model bundle and applied verbatim at scoring time.

use serde::{Deserialize, Serialize};

/// Per-column standardization transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std_dev: Vec<f64>,
}

impl StandardScaler {
    /// Fits means and standard deviations on the given rows
    ///
    /// Columns with zero variance keep a deviation of 1 so standardizing
    /// them is a no-op rather than a division by zero.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);

        let mut mean = vec![0.0; n_cols];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n_rows.max(1) as f64;
        }

        let mut variance = vec![0.0; n_cols];
        for row in rows {
            for ((var, v), m) in variance.iter_mut().zip(row).zip(&mean) {
                *var += (v - m) * (v - m);
            }
        }

        let std_dev = variance
            .into_iter()
            .map(|var| {
                let sd = (var / n_rows.max(1) as f64).sqrt();
                if sd > 0.0 {
                    sd
                } else {
                    1.0
                }
            })
            .collect();

        Self { mean, std_dev }
    }

    /// Number of columns this scaler was fit on
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Standardizes one row in place
    pub fn transform_row(&self, row: &mut [f64]) {
        for ((v, m), sd) in row.iter_mut().zip(&self.mean).zip(&self.std_dev) {
            *v = (*v - m) / sd;
        }
    }

    /// Standardizes a batch of rows in place
    pub fn transform(&self, rows: &mut [Vec<f64>]) {
        for row in rows {
            self.transform_row(row);
        }
    }
}
