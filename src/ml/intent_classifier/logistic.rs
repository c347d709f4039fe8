//! Multinomial logistic regression over sparse TF-IDF features.
//!
//! The model keeps one weight row and one intercept per class and predicts
//! the class with the highest linear score. Training minimizes the mean
//! softmax cross-entropy plus an L2 penalty on the weights (intercepts are
//! not penalized) with full-batch gradient descent:
//!
//! ```text
//! J(W, b) = 1/n Σ -ln softmax(W·xᵢ + b)[yᵢ] + 1/(2·C·n) ‖W‖²
//! ```
//!
//! This is the same optimum as minimizing `½‖W‖² + C Σ loss`.

use std::collections::BTreeSet;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ParleyError, Result};
use crate::ml::intent_classifier::config::ClassifierConfig;
use crate::ml::intent_classifier::types::{FeatureVector, TrainingStats};

/// Half-width of the uniform range initial weights are drawn from.
const INIT_SCALE: f64 = 1e-2;

/// Lower bound applied to probabilities before taking their logarithm.
const MIN_PROBABILITY: f64 = 1e-300;

/// Multinomial logistic regression classifier.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    config: ClassifierConfig,
    /// Class labels in sorted order; row `k` of `weights` belongs to `classes[k]`.
    classes: Vec<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    n_features: usize,
    stats: Option<TrainingStats>,
}

impl LogisticRegression {
    /// Create an untrained model.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            classes: Vec::new(),
            weights: Vec::new(),
            intercepts: Vec::new(),
            n_features: 0,
            stats: None,
        }
    }

    /// Fit the model on feature vectors and their labels.
    pub fn fit(&mut self, features: &[FeatureVector], labels: &[String]) -> Result<()> {
        self.config.validate()?;
        if features.is_empty() {
            return Err(ParleyError::invalid_argument(
                "cannot fit a model on zero samples",
            ));
        }
        if features.len() != labels.len() {
            return Err(ParleyError::invalid_argument(format!(
                "got {} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let n_features = features[0].dimension();
        if let Some(position) = features.iter().position(|x| x.dimension() != n_features) {
            return Err(ParleyError::invalid_argument(format!(
                "feature vector #{position} has dimension {}, expected {n_features}",
                features[position].dimension()
            )));
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let targets: Vec<usize> = labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();

        let n_classes = classes.len();
        let n_samples = features.len() as f64;
        let penalty = 1.0 / (self.config.c * n_samples);
        let learning_rate = self.config.learning_rate;

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut weights: Vec<Vec<f64>> = (0..n_classes)
            .map(|_| {
                (0..n_features)
                    .map(|_| rng.random_range(-INIT_SCALE..INIT_SCALE))
                    .collect()
            })
            .collect();
        let mut intercepts = vec![0.0; n_classes];

        let start_time = Instant::now();
        let mut training_losses = Vec::new();
        let mut final_gradient = f64::INFINITY;
        let mut converged = false;

        let mut grad_weights = vec![vec![0.0; n_features]; n_classes];
        let mut grad_intercepts = vec![0.0; n_classes];
        let mut probabilities = vec![0.0; n_classes];

        for _ in 0..self.config.max_iter {
            for row in &mut grad_weights {
                row.iter_mut().for_each(|g| *g = 0.0);
            }
            grad_intercepts.iter_mut().for_each(|g| *g = 0.0);

            let mut loss = 0.0;
            for (x, &target) in features.iter().zip(&targets) {
                for (k, probability) in probabilities.iter_mut().enumerate() {
                    *probability = intercepts[k] + x.dot(&weights[k]);
                }
                softmax_in_place(&mut probabilities);
                loss -= probabilities[target].max(MIN_PROBABILITY).ln();

                for (k, &probability) in probabilities.iter().enumerate() {
                    let residual = probability - if k == target { 1.0 } else { 0.0 };
                    grad_intercepts[k] += residual;
                    for &(index, value) in x.entries() {
                        grad_weights[k][index] += residual * value;
                    }
                }
            }

            let mut squared_norm = 0.0;
            let mut max_gradient: f64 = 0.0;
            for k in 0..n_classes {
                grad_intercepts[k] /= n_samples;
                max_gradient = max_gradient.max(grad_intercepts[k].abs());
                for (gradient, &weight) in grad_weights[k].iter_mut().zip(&weights[k]) {
                    *gradient = *gradient / n_samples + penalty * weight;
                    max_gradient = max_gradient.max(gradient.abs());
                    squared_norm += weight * weight;
                }
            }

            training_losses.push(loss / n_samples + 0.5 * penalty * squared_norm);
            final_gradient = max_gradient;
            if max_gradient < self.config.tol {
                converged = true;
                break;
            }

            for k in 0..n_classes {
                intercepts[k] -= learning_rate * grad_intercepts[k];
                for (weight, gradient) in weights[k].iter_mut().zip(&grad_weights[k]) {
                    *weight -= learning_rate * gradient;
                }
            }
        }

        let stats = TrainingStats {
            iterations: training_losses.len(),
            final_loss: training_losses.last().copied().unwrap_or_default(),
            training_losses,
            final_gradient,
            converged,
            training_time_ms: start_time.elapsed().as_millis() as u64,
        };

        if converged {
            log::debug!(
                "Logistic regression converged after {} iterations (loss {:.6})",
                stats.iterations,
                stats.final_loss
            );
        } else {
            log::warn!(
                "Logistic regression stopped at max_iter={} before converging (gradient {:.2e} > tol {:.2e})",
                self.config.max_iter,
                stats.final_gradient,
                self.config.tol
            );
        }

        self.classes = classes;
        self.weights = weights;
        self.intercepts = intercepts;
        self.n_features = n_features;
        self.stats = Some(stats);

        Ok(())
    }

    /// Linear score for every class, in [`classes`](Self::classes) order.
    pub fn decision_function(&self, x: &FeatureVector) -> Result<Vec<f64>> {
        if !self.is_trained() {
            return Err(ParleyError::not_trained(
                "LogisticRegression used before fit",
            ));
        }
        if x.dimension() != self.n_features {
            return Err(ParleyError::invalid_argument(format!(
                "feature vector has dimension {}, model expects {}",
                x.dimension(),
                self.n_features
            )));
        }

        Ok(self
            .weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| intercept + x.dot(row))
            .collect())
    }

    /// Class probabilities, in [`classes`](Self::classes) order.
    pub fn predict_proba(&self, x: &FeatureVector) -> Result<Vec<f64>> {
        let mut scores = self.decision_function(x)?;
        softmax_in_place(&mut scores);
        Ok(scores)
    }

    /// The best-scoring class. Ties go to the earliest class.
    pub fn predict(&self, x: &FeatureVector) -> Result<&str> {
        let scores = self.decision_function(x)?;
        let mut best = 0;
        for (k, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = k;
            }
        }
        Ok(&self.classes[best])
    }

    /// Class labels in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether `fit` has completed.
    pub fn is_trained(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Number of input features the model was fit on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Intercept per class, in [`classes`](Self::classes) order.
    pub fn intercepts(&self) -> &[f64] {
        &self.intercepts
    }

    /// Statistics from the last `fit`.
    pub fn training_stats(&self) -> Option<&TrainingStats> {
        self.stats.as_ref()
    }

    /// The configuration this model trains with.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

/// Numerically stable softmax.
fn softmax_in_place(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for value in values.iter_mut() {
        *value = (*value - max).exp();
        sum += *value;
    }
    for value in values.iter_mut() {
        *value /= sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_hot(dimension: usize, index: usize) -> FeatureVector {
        FeatureVector::from_sorted(dimension, vec![(index, 1.0)])
    }

    fn toy_data() -> (Vec<FeatureVector>, Vec<String>) {
        let features = vec![one_hot(4, 0), one_hot(4, 1), one_hot(4, 2), one_hot(4, 3)];
        let labels = ["b", "b", "a", "a"].iter().map(|s| s.to_string()).collect();
        (features, labels)
    }

    #[test]
    fn test_fit_and_predict() {
        let (features, labels) = toy_data();
        let mut model = LogisticRegression::new(ClassifierConfig::default());
        model.fit(&features, &labels).unwrap();

        assert_eq!(model.classes(), &["a", "b"]);
        assert_eq!(model.n_features(), 4);
        for (x, label) in features.iter().zip(&labels) {
            assert_eq!(model.predict(x).unwrap(), label);
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (features, labels) = toy_data();
        let mut model = LogisticRegression::new(ClassifierConfig::default());
        model.fit(&features, &labels).unwrap();

        let probabilities = model.predict_proba(&features[0]).unwrap();
        assert_eq!(probabilities.len(), 2);
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probabilities[1] > probabilities[0]);
    }

    #[test]
    fn test_training_is_deterministic() {
        let (features, labels) = toy_data();
        let config = ClassifierConfig::default().with_max_iter(25);

        let mut first = LogisticRegression::new(config.clone());
        first.fit(&features, &labels).unwrap();
        let mut second = LogisticRegression::new(config);
        second.fit(&features, &labels).unwrap();

        let probe = FeatureVector::from_sorted(4, vec![(0, 0.6), (2, 0.8)]);
        assert_eq!(
            first.decision_function(&probe).unwrap(),
            second.decision_function(&probe).unwrap()
        );
    }

    #[test]
    fn test_loss_decreases() {
        let (features, labels) = toy_data();
        let mut model = LogisticRegression::new(ClassifierConfig::default().with_max_iter(50));
        model.fit(&features, &labels).unwrap();

        let stats = model.training_stats().unwrap();
        assert_eq!(stats.iterations, stats.training_losses.len());
        assert!(stats.iterations <= 50);
        assert!(stats.final_loss < stats.training_losses[0]);
    }

    #[test]
    fn test_iteration_bound() {
        let (features, labels) = toy_data();
        let config = ClassifierConfig {
            max_iter: 3,
            tol: 0.0,
            ..ClassifierConfig::default()
        };
        let mut model = LogisticRegression::new(config);
        model.fit(&features, &labels).unwrap();

        let stats = model.training_stats().unwrap();
        assert_eq!(stats.iterations, 3);
        assert!(!stats.converged);
    }

    #[test]
    fn test_zero_vector_picks_a_known_class() {
        let (features, labels) = toy_data();
        let mut model = LogisticRegression::new(ClassifierConfig::default());
        model.fit(&features, &labels).unwrap();

        let class = model.predict(&FeatureVector::zeros(4)).unwrap();
        assert!(model.classes().iter().any(|c| c == class));
    }

    #[test]
    fn test_single_class() {
        let features = vec![one_hot(2, 0), one_hot(2, 1)];
        let labels = vec!["only".to_string(), "only".to_string()];
        let mut model = LogisticRegression::new(ClassifierConfig::default());
        model.fit(&features, &labels).unwrap();

        assert_eq!(model.predict(&FeatureVector::zeros(2)).unwrap(), "only");
    }

    #[test]
    fn test_untrained_model() {
        let model = LogisticRegression::new(ClassifierConfig::default());
        let result = model.predict(&FeatureVector::zeros(2));
        assert!(matches!(result, Err(ParleyError::NotTrained(_))));
    }

    #[test]
    fn test_invalid_inputs() {
        let (features, labels) = toy_data();
        let mut model = LogisticRegression::new(ClassifierConfig::default());

        assert!(model.fit(&[], &[]).is_err());
        assert!(model.fit(&features, &labels[..2]).is_err());

        let mixed = vec![one_hot(4, 0), one_hot(3, 0)];
        assert!(model.fit(&mixed, &labels[..2]).is_err());

        model.fit(&features, &labels).unwrap();
        assert!(model.predict(&FeatureVector::zeros(7)).is_err());
    }

    #[test]
    fn test_softmax() {
        let mut values = vec![1000.0, 1000.0];
        softmax_in_place(&mut values);
        assert_eq!(values, vec![0.5, 0.5]);
    }
}
