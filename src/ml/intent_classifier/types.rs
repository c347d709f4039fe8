//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// Training sample for intent classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSample {
    /// Utterance text.
    pub text: String,
    /// Intent tag.
    pub intent: String,
}

impl IntentSample {
    /// Create a new sample.
    pub fn new<T: Into<String>, I: Into<String>>(text: T, intent: I) -> Self {
        IntentSample {
            text: text.into(),
            intent: intent.into(),
        }
    }
}

/// A sparse vector in the vectorizer's feature space.
///
/// Entries are `(feature index, weight)` pairs sorted by index, with no
/// zero weights stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Create a feature vector. `entries` must be sorted by index and every
    /// index must be below `dimension`.
    pub(crate) fn from_sorted(dimension: usize, entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(entries.iter().all(|&(index, _)| index < dimension));
        FeatureVector { dimension, entries }
    }

    /// The all-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        FeatureVector {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Length of the dense representation.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Non-zero entries, sorted by index.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// True when every component is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at `index` (zero when absent).
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|position| self.entries[position].1)
            .unwrap_or(0.0)
    }

    /// Dot product with a dense weight row.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(index, weight)| weight * dense[index])
            .sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt()
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(index, weight) in &self.entries {
            dense[index] = weight;
        }
        dense
    }
}

/// Statistics recorded while fitting a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Number of gradient steps taken.
    pub iterations: usize,
    /// Objective value (mean cross-entropy plus penalty) per iteration.
    pub training_losses: Vec<f64>,
    /// Objective value at the last iteration.
    pub final_loss: f64,
    /// Largest absolute gradient component at the last iteration.
    pub final_gradient: f64,
    /// Whether the gradient fell below the tolerance before `max_iter`.
    pub converged: bool,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
}

/// A sample the classifier got wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misclassification {
    /// Utterance text.
    pub text: String,
    /// Tag in the labeled data.
    pub expected: String,
    /// Tag the classifier returned.
    pub predicted: String,
}

/// Accuracy of a classifier over a set of labeled samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Number of samples evaluated.
    pub total: usize,
    /// Number of samples classified correctly.
    pub correct: usize,
    /// `correct / total` (0.0 when there are no samples).
    pub accuracy: f64,
    /// Samples classified incorrectly, in input order.
    pub misclassified: Vec<Misclassification>,
}
