//! Intent classifier combining a TF-IDF vectorizer with logistic regression.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::{ParleyError, Result};
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::config::ClassifierConfig;
use crate::ml::intent_classifier::logistic::LogisticRegression;
use crate::ml::intent_classifier::tfidf::TfIdfVectorizer;
use crate::ml::intent_classifier::types::IntentSample;

/// Machine learning-based intent classifier.
///
/// Built once from labeled samples and immutable afterwards. The vectorizer
/// fitted during training is the one used for every prediction.
#[derive(Debug)]
pub struct MLBasedIntentClassifier {
    vectorizer: TfIdfVectorizer,
    model: LogisticRegression,
}

impl MLBasedIntentClassifier {
    /// Train a classifier from samples with the default configuration.
    pub fn new(samples: Vec<IntentSample>, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        Self::with_config(samples, analyzer, ClassifierConfig::default())
    }

    /// Train a classifier from samples.
    pub fn with_config(
        samples: Vec<IntentSample>,
        analyzer: Arc<dyn Analyzer>,
        config: ClassifierConfig,
    ) -> Result<Self> {
        if samples.is_empty() {
            return Err(ParleyError::invalid_argument(
                "training samples cannot be empty",
            ));
        }

        let (documents, labels): (Vec<String>, Vec<String>) = samples
            .into_iter()
            .map(|sample| (sample.text, sample.intent))
            .unzip();

        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        let features = vectorizer.fit_transform(&documents)?;

        let mut model = LogisticRegression::new(config);
        model.fit(&features, &labels)?;

        log::info!(
            "Trained intent classifier: {} samples, {} intents, {} terms",
            documents.len(),
            model.classes().len(),
            vectorizer.vocabulary_size()
        );

        Ok(Self { vectorizer, model })
    }

    /// Classify text into one of the training tags.
    pub fn classify(&self, text: &str) -> Result<&str> {
        let features = self.vectorizer.transform(text)?;
        let tag = self.model.predict(&features)?;
        log::debug!("Classified {text:?} as '{tag}' ({} known terms)", features.nnz());
        Ok(tag)
    }

    /// Every tag with its probability, most likely first.
    pub fn predict_proba(&self, text: &str) -> Result<Vec<(String, f64)>> {
        let features = self.vectorizer.transform(text)?;
        let probabilities = self.model.predict_proba(&features)?;

        let mut ranked: Vec<(String, f64)> = self
            .model
            .classes()
            .iter()
            .cloned()
            .zip(probabilities)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(ranked)
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// The trained model.
    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }
}

impl IntentClassifier for MLBasedIntentClassifier {
    fn predict(&self, text: &str) -> Result<String> {
        self.classify(text).map(str::to_string)
    }

    fn labels(&self) -> Vec<String> {
        self.model.classes().to_vec()
    }

    fn name(&self) -> &str {
        "ml_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::StandardAnalyzer;

    fn samples() -> Vec<IntentSample> {
        vec![
            IntentSample::new("hi", "greeting"),
            IntentSample::new("hello", "greeting"),
            IntentSample::new("good morning", "greeting"),
            IntentSample::new("bye", "goodbye"),
            IntentSample::new("goodbye", "goodbye"),
            IntentSample::new("see you later", "goodbye"),
            IntentSample::new("thanks", "thanks"),
            IntentSample::new("thank you so much", "thanks"),
            IntentSample::new("what is the weather like", "weather"),
            IntentSample::new("is it going to rain today", "weather"),
        ]
    }

    fn classifier() -> MLBasedIntentClassifier {
        let analyzer = Arc::new(StandardAnalyzer::new().unwrap());
        MLBasedIntentClassifier::new(samples(), analyzer).unwrap()
    }

    #[test]
    fn test_ml_intent_classifier() {
        let classifier = classifier();

        assert_eq!(classifier.classify("Hello!").unwrap(), "greeting");
        assert_eq!(classifier.classify("ok bye").unwrap(), "goodbye");
        assert_eq!(classifier.classify("thanks a lot").unwrap(), "thanks");
        assert_eq!(classifier.classify("will it rain tomorrow").unwrap(), "weather");
    }

    #[test]
    fn test_training_set_is_recalled() {
        let classifier = classifier();

        for sample in samples() {
            assert_eq!(classifier.classify(&sample.text).unwrap(), sample.intent);
        }
    }

    #[test]
    fn test_closed_label_set() {
        let classifier = classifier();
        let labels = classifier.labels();

        assert_eq!(labels, vec!["goodbye", "greeting", "thanks", "weather"]);
        for text in ["", "zzyxqq_unseen_token", "!!!", "the quick brown fox"] {
            let tag = classifier.predict(text).unwrap();
            assert!(labels.contains(&tag), "unexpected tag {tag} for {text:?}");
        }
    }

    #[test]
    fn test_predict_proba_is_ranked() {
        let classifier = classifier();
        let ranked = classifier.predict_proba("hello there").unwrap();

        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].0, "greeting");
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!((ranked.iter().map(|(_, p)| p).sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_samples() {
        let analyzer = Arc::new(StandardAnalyzer::new().unwrap());
        assert!(MLBasedIntentClassifier::new(Vec::new(), analyzer).is_err());
    }

    #[test]
    fn test_name() {
        assert_eq!(classifier().name(), "ml_based");
    }
}
