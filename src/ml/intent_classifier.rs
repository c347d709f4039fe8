//! Intent classification using TF-IDF features and logistic regression.
//!
//! # Architecture
//!
//! - `IntentClassifier` trait: common interface, also implemented by test stubs
//! - `MLBasedIntentClassifier`: vectorizer + model, trained once, then read-only
//! - `TfIdfVectorizer`: feature extraction with a frozen vocabulary
//! - `LogisticRegression`: multinomial linear model, seeded gradient descent
//! - `IntentSample`: training data structure
//!
//! # Example
//!
//! ```rust
//! use parley::ml::intent_classifier::{self, ClassifierConfig, IntentSample};
//! use parley::analysis::analyzer::StandardAnalyzer;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let samples = vec![
//!     IntentSample::new("hi there", "greeting"),
//!     IntentSample::new("see you later", "goodbye"),
//! ];
//!
//! let analyzer = Arc::new(StandardAnalyzer::new()?);
//! let classifier = intent_classifier::new_ml_based(samples, analyzer, ClassifierConfig::default())?;
//!
//! assert_eq!(classifier.predict("hi")?, "greeting");
//! # Ok(())
//! # }
//! ```

mod classifier;
mod config;
mod logistic;
mod ml_classifier;
mod tfidf;
mod training;
mod types;

pub use classifier::IntentClassifier;
pub use config::ClassifierConfig;
pub use logistic::LogisticRegression;
pub use ml_classifier::MLBasedIntentClassifier;
pub use tfidf::TfIdfVectorizer;
pub use training::{evaluate, new_ml_based, train_on_corpus};
pub use types::{Evaluation, FeatureVector, IntentSample, Misclassification, TrainingStats};
