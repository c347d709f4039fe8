//! Helper functions for training and evaluating intent classifiers.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::corpus::Corpus;
use crate::error::Result;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::config::ClassifierConfig;
use crate::ml::intent_classifier::ml_classifier::MLBasedIntentClassifier;
use crate::ml::intent_classifier::types::{Evaluation, IntentSample, Misclassification};

/// Create a new ML-based intent classifier from training samples.
pub fn new_ml_based(
    samples: Vec<IntentSample>,
    analyzer: Arc<dyn Analyzer>,
    config: ClassifierConfig,
) -> Result<Box<dyn IntentClassifier>> {
    Ok(Box::new(MLBasedIntentClassifier::with_config(
        samples, analyzer, config,
    )?))
}

/// Train a classifier on every pattern of a corpus with the standard analyzer.
pub fn train_on_corpus(corpus: &Corpus, config: ClassifierConfig) -> Result<MLBasedIntentClassifier> {
    let analyzer = Arc::new(StandardAnalyzer::new()?);
    MLBasedIntentClassifier::with_config(corpus.samples(), analyzer, config)
}

/// Measure how many samples a classifier labels correctly.
pub fn evaluate(classifier: &dyn IntentClassifier, samples: &[IntentSample]) -> Result<Evaluation> {
    let mut misclassified = Vec::new();
    for sample in samples {
        let predicted = classifier.predict(&sample.text)?;
        if predicted != sample.intent {
            misclassified.push(Misclassification {
                text: sample.text.clone(),
                expected: sample.intent.clone(),
                predicted,
            });
        }
    }

    let total = samples.len();
    let correct = total - misclassified.len();
    let accuracy = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    };

    Ok(Evaluation {
        total,
        correct,
        accuracy,
        misclassified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Intent;

    struct ConstantClassifier(&'static str);

    impl IntentClassifier for ConstantClassifier {
        fn predict(&self, _text: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn labels(&self) -> Vec<String> {
            vec![self.0.to_string()]
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn test_evaluate_counts_mistakes() {
        let samples = vec![
            IntentSample::new("hi", "greeting"),
            IntentSample::new("hello", "greeting"),
            IntentSample::new("bye", "goodbye"),
        ];

        let evaluation = evaluate(&ConstantClassifier("greeting"), &samples).unwrap();
        assert_eq!(evaluation.total, 3);
        assert_eq!(evaluation.correct, 2);
        assert!((evaluation.accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(evaluation.misclassified.len(), 1);
        assert_eq!(evaluation.misclassified[0].text, "bye");
        assert_eq!(evaluation.misclassified[0].predicted, "greeting");
    }

    #[test]
    fn test_evaluate_empty() {
        let evaluation = evaluate(&ConstantClassifier("greeting"), &[]).unwrap();
        assert_eq!(evaluation.total, 0);
        assert_eq!(evaluation.accuracy, 0.0);
    }

    #[test]
    fn test_train_on_corpus() {
        let corpus = Corpus::from_intents(vec![
            Intent::new("greeting", ["hi", "hello"], ["Hello!", "Hi there!"]),
            Intent::new("goodbye", ["bye", "goodbye"], ["Goodbye!", "Take care!"]),
        ])
        .unwrap();

        let classifier = train_on_corpus(&corpus, ClassifierConfig::default()).unwrap();
        assert_eq!(classifier.classify("hello").unwrap(), "greeting");
        assert_eq!(classifier.classify("goodbye").unwrap(), "goodbye");

        let boxed = new_ml_based(
            corpus.samples(),
            Arc::new(StandardAnalyzer::new().unwrap()),
            ClassifierConfig::default(),
        )
        .unwrap();
        let evaluation = evaluate(boxed.as_ref(), &corpus.samples()).unwrap();
        assert_eq!(evaluation.accuracy, 1.0);
    }
}
