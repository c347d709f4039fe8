//! Chat bot: maps a message to an intent and picks one of its responses.
//!
//! # Examples
//!
//! ```
//! use parley::chat::bot::ChatBot;
//! use parley::corpus::{Corpus, Intent};
//! use parley::ml::intent_classifier::ClassifierConfig;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let corpus = Corpus::from_intents(vec![
//!     Intent::new("greeting", ["hi", "hello"], ["Hello!", "Hi there!"]),
//!     Intent::new("goodbye", ["bye", "goodbye"], ["Goodbye!", "Take care!"]),
//! ]).unwrap();
//!
//! let bot = ChatBot::train(corpus, ClassifierConfig::default()).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let exchange = bot.respond("hello", &mut rng).unwrap();
//!
//! assert_eq!(exchange.tag, "greeting");
//! assert!(["Hello!", "Hi there!"].contains(&exchange.response.as_str()));
//! ```

use std::sync::Arc;

use chrono::{DateTime, Local};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, Intent};
use crate::error::{ParleyError, Result};
use crate::ml::intent_classifier::{self, ClassifierConfig, IntentClassifier};

/// One completed message/response round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    /// Raw text the user sent.
    pub user_input: String,
    /// Tag the classifier chose.
    pub tag: String,
    /// Response selected from the tag's intent.
    pub response: String,
    /// When the response was produced.
    pub timestamp: DateTime<Local>,
}

/// Owns the corpus and the trained classifier.
///
/// Both are read-only after construction, so a `ChatBot` can be shared
/// between threads; the random source is supplied per call.
pub struct ChatBot {
    corpus: Corpus,
    classifier: Arc<dyn IntentClassifier>,
}

impl std::fmt::Debug for ChatBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatBot")
            .field("intents", &self.corpus.len())
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

impl ChatBot {
    /// Pair a corpus with an already trained classifier.
    ///
    /// Fails if the classifier can return a tag the corpus does not define.
    pub fn new(corpus: Corpus, classifier: Arc<dyn IntentClassifier>) -> Result<Self> {
        if let Some(unknown) = classifier
            .labels()
            .into_iter()
            .find(|label| corpus.intent(label).is_none())
        {
            return Err(ParleyError::corpus(format!(
                "classifier '{}' can return tag '{unknown}' which is not in the corpus",
                classifier.name()
            )));
        }

        Ok(Self { corpus, classifier })
    }

    /// Train the standard classifier on the corpus and wrap both.
    pub fn train(corpus: Corpus, config: ClassifierConfig) -> Result<Self> {
        let classifier = intent_classifier::train_on_corpus(&corpus, config)?;
        Self::new(corpus, Arc::new(classifier))
    }

    /// Classify text into one of the corpus tags.
    pub fn classify(&self, text: &str) -> Result<String> {
        self.classifier.predict(text)
    }

    /// Classify `text` and pick a response for the matched intent.
    pub fn respond<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Result<Exchange> {
        let tag = self.classify(text)?;
        let intent = self.corpus.intent(&tag).ok_or_else(|| {
            ParleyError::corpus(format!("classifier returned unknown tag '{tag}'"))
        })?;
        let response = select_response(intent, rng)?.to_string();

        Ok(Exchange {
            user_input: text.to_string(),
            tag,
            response,
            timestamp: Local::now(),
        })
    }

    /// The corpus responses are drawn from.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The classifier in use.
    pub fn classifier(&self) -> &dyn IntentClassifier {
        self.classifier.as_ref()
    }
}

/// Pick one of the intent's responses uniformly at random.
pub fn select_response<'a, R: Rng + ?Sized>(intent: &'a Intent, rng: &mut R) -> Result<&'a str> {
    intent
        .responses
        .choose(rng)
        .map(String::as_str)
        .ok_or_else(|| ParleyError::corpus(format!("intent '{}' has no responses", intent.tag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct FixedClassifier {
        tag: String,
        labels: Vec<String>,
    }

    impl FixedClassifier {
        fn new(tag: &str, labels: &[&str]) -> Self {
            Self {
                tag: tag.to_string(),
                labels: labels.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl IntentClassifier for FixedClassifier {
        fn predict(&self, _text: &str) -> Result<String> {
            Ok(self.tag.clone())
        }

        fn labels(&self) -> Vec<String> {
            self.labels.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn corpus() -> Corpus {
        Corpus::from_intents(vec![
            Intent::new("greeting", ["hi", "hello"], ["Hello!", "Hi there!"]),
            Intent::new("goodbye", ["bye", "goodbye"], ["Goodbye!", "Take care!"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_respond_with_stub_classifier() {
        let classifier = Arc::new(FixedClassifier::new("goodbye", &["greeting", "goodbye"]));
        let bot = ChatBot::new(corpus(), classifier).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let exchange = bot.respond("anything at all", &mut rng).unwrap();
        assert_eq!(exchange.user_input, "anything at all");
        assert_eq!(exchange.tag, "goodbye");
        assert!(["Goodbye!", "Take care!"].contains(&exchange.response.as_str()));
    }

    #[test]
    fn test_classifier_labels_must_exist_in_corpus() {
        let classifier = Arc::new(FixedClassifier::new("weather", &["weather"]));
        let error = ChatBot::new(corpus(), classifier).unwrap_err();
        assert!(matches!(error, ParleyError::Corpus(_)));
    }

    #[test]
    fn test_unknown_tag_at_runtime() {
        // Labels claim only known tags but predict returns something else.
        let classifier = Arc::new(FixedClassifier::new("weather", &["greeting"]));
        let bot = ChatBot::new(corpus(), classifier).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(bot.respond("hi", &mut rng).is_err());
    }

    #[test]
    fn test_selection_is_reproducible_with_seed() {
        let corpus = corpus();
        let intent = corpus.intent("greeting").unwrap();

        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| select_response(intent, &mut rng).unwrap().to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(picks(9), picks(9));
    }

    #[test]
    fn test_selection_covers_all_responses() {
        let corpus = corpus();
        let intent = corpus.intent("goodbye").unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(select_response(intent, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_train_and_respond() {
        let bot = ChatBot::train(corpus(), ClassifierConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(bot.classify("hello").unwrap(), "greeting");
        let exchange = bot.respond("goodbye", &mut rng).unwrap();
        assert_eq!(exchange.tag, "goodbye");
        assert!(
            bot.corpus()
                .intent("goodbye")
                .unwrap()
                .responses
                .contains(&exchange.response)
        );
        assert_eq!(bot.classifier().name(), "ml_based");
    }
}
