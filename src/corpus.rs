//! Intent corpus loading and validation.
//!
//! A corpus is an ordered collection of [`Intent`]s. It is read once at
//! startup, validated eagerly, and never modified afterwards.
//!
//! Two JSON layouts are accepted:
//!
//! ```json
//! [
//!   {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]}
//! ]
//! ```
//!
//! or the same array wrapped in an object under an `"intents"` key.
//!
//! # Examples
//!
//! ```
//! use parley::corpus::Corpus;
//!
//! let corpus = Corpus::from_json_str(
//!     r#"[{"tag": "greeting", "patterns": ["hi"], "responses": ["Hello!"]}]"#,
//! ).unwrap();
//!
//! let (texts, labels) = corpus.flatten();
//! assert_eq!(texts, vec!["hi"]);
//! assert_eq!(labels, vec!["greeting"]);
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};
use crate::ml::intent_classifier::IntentSample;

/// A labeled category of user request with example utterances and replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier of this intent.
    pub tag: String,
    /// Example utterances used for training.
    pub patterns: Vec<String>,
    /// Candidate replies, one of which is chosen at random.
    pub responses: Vec<String>,
}

impl Intent {
    /// Create a new intent.
    pub fn new<S, P, R>(tag: S, patterns: P, responses: R) -> Self
    where
        S: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Intent {
            tag: tag.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Intent record as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawIntent {
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    responses: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CorpusDocument {
    List(Vec<RawIntent>),
    Wrapped { intents: Vec<RawIntent> },
}

impl CorpusDocument {
    fn into_intents(self) -> Vec<RawIntent> {
        match self {
            CorpusDocument::List(intents) => intents,
            CorpusDocument::Wrapped { intents } => intents,
        }
    }
}

/// A validated, read-only collection of intents.
#[derive(Debug, Clone)]
pub struct Corpus {
    intents: Vec<Intent>,
    /// tag -> position in `intents`.
    index: HashMap<String, usize>,
}

impl Corpus {
    /// Build a corpus from intents, validating the structural invariants.
    ///
    /// Fails if the corpus is empty, if any intent has an empty tag, no
    /// patterns or no responses, or if two intents share a tag.
    pub fn from_intents(intents: Vec<Intent>) -> Result<Self> {
        if intents.is_empty() {
            return Err(ParleyError::corpus("corpus contains no intents"));
        }

        let mut index = HashMap::with_capacity(intents.len());
        for (position, intent) in intents.iter().enumerate() {
            if intent.tag.trim().is_empty() {
                return Err(ParleyError::corpus(format!(
                    "intent #{position} has an empty tag"
                )));
            }
            if intent.patterns.is_empty() {
                return Err(ParleyError::corpus(format!(
                    "intent #{position} ('{}') has no patterns",
                    intent.tag
                )));
            }
            if intent.responses.is_empty() {
                return Err(ParleyError::corpus(format!(
                    "intent #{position} ('{}') has no responses",
                    intent.tag
                )));
            }
            if let Some(first) = index.insert(intent.tag.clone(), position) {
                return Err(ParleyError::corpus(format!(
                    "duplicate tag '{}' at intents #{first} and #{position}",
                    intent.tag
                )));
            }
        }

        Ok(Corpus { intents, index })
    }

    /// Parse and validate a corpus from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CorpusDocument = serde_json::from_str(json)?;
        Self::from_raw(document.into_intents())
    }

    /// Parse and validate a corpus from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CorpusDocument = serde_json::from_reader(reader)?;
        Self::from_raw(document.into_intents())
    }

    /// Load and validate a corpus from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let corpus = Self::from_reader(BufReader::new(file))?;

        log::info!(
            "Loaded {} intents ({} patterns) from {}",
            corpus.len(),
            corpus.pattern_count(),
            path.display()
        );

        Ok(corpus)
    }

    fn from_raw(raw: Vec<RawIntent>) -> Result<Self> {
        let intents = raw
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                let tag = raw
                    .tag
                    .ok_or_else(|| ParleyError::corpus(format!("intent #{position} is missing a tag")))?;
                Ok(Intent {
                    tag,
                    patterns: raw.patterns,
                    responses: raw.responses,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_intents(intents)
    }

    /// All intents, in corpus order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Look up an intent by tag.
    pub fn intent(&self, tag: &str) -> Option<&Intent> {
        self.index.get(tag).map(|&position| &self.intents[position])
    }

    /// Tags in corpus order.
    pub fn tags(&self) -> Vec<&str> {
        self.intents.iter().map(|intent| intent.tag.as_str()).collect()
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Always false for a validated corpus.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Total number of patterns across all intents.
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|intent| intent.patterns.len()).sum()
    }

    /// Flatten into parallel (text, label) sequences.
    ///
    /// Intent order and pattern order within each intent are preserved.
    pub fn flatten(&self) -> (Vec<String>, Vec<String>) {
        self.intents
            .iter()
            .flat_map(|intent| {
                intent
                    .patterns
                    .iter()
                    .map(move |pattern| (pattern.clone(), intent.tag.clone()))
            })
            .unzip()
    }

    /// Flatten into training samples, in the same order as [`Corpus::flatten`].
    pub fn samples(&self) -> Vec<IntentSample> {
        let (texts, labels) = self.flatten();
        texts
            .into_iter()
            .zip(labels)
            .map(|(text, intent)| IntentSample { text, intent })
            .collect()
    }
}
