//! Training configuration for the logistic regression intent model.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

/// Hyperparameters for [`LogisticRegression`](super::LogisticRegression).
///
/// Every field has a default, so a partial JSON document such as
/// `{"seed": 7}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum number of gradient descent iterations.
    pub max_iter: usize,
    /// Stop once the largest absolute gradient component is below this value.
    pub tol: f64,
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// Inverse L2 regularization strength; smaller values regularize more.
    pub c: f64,
    /// Seed for weight initialization.
    pub seed: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            tol: 1e-4,
            learning_rate: 1.0,
            c: 1.0,
            seed: 0,
        }
    }
}

impl ClassifierConfig {
    /// Replace the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the iteration bound.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every hyperparameter is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(ParleyError::invalid_argument("max_iter must be at least 1"));
        }
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(ParleyError::invalid_argument(
                "tol must be a non-negative number",
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ParleyError::invalid_argument(
                "learning_rate must be a positive number",
            ));
        }
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(ParleyError::invalid_argument("c must be a positive number"));
        }
        Ok(())
    }
}
