//! TF-IDF vectorizer for text feature extraction.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::{ParleyError, Result};
use crate::ml::intent_classifier::types::FeatureVector;

/// TF-IDF vectorizer for text feature extraction.
///
/// The vocabulary is every distinct term produced by the analyzer over the
/// training documents, indexed in sorted term order. A document's weight for
/// a term is `count * idf`, where `idf = ln((1 + n) / (1 + df)) + 1`; the
/// resulting vector is scaled to unit length. Terms outside the vocabulary
/// are ignored, so any text can be transformed once the vectorizer is fit.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Index -> term.
    terms: Vec<String>,
    /// Inverse document frequency for each term.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new, unfitted TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Fails if there are no documents or if the analyzer produces no terms
    /// at all.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(ParleyError::invalid_argument(
                "cannot fit a vectorizer on zero documents",
            ));
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique_terms: BTreeSet<String> = self.analyzer.terms(doc)?.into_iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(ParleyError::analysis(
                "empty vocabulary: the training documents contain no terms",
            ));
        }

        let n_documents = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((n_documents + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term.clone(), index);
            terms.push(term);
        }

        self.vocabulary = vocabulary;
        self.terms = terms;
        self.idf = idf;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Fit on `documents` and return their feature vectors.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<FeatureVector>> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Transform a document into a unit-length TF-IDF feature vector.
    ///
    /// Documents without any known term map to the zero vector.
    pub fn transform(&self, document: &str) -> Result<FeatureVector> {
        if !self.is_fitted() {
            return Err(ParleyError::not_trained(
                "TfIdfVectorizer::transform called before fit",
            ));
        }

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyzer.terms(document)? {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();

        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }

        Ok(FeatureVector::from_sorted(self.vocabulary_size(), entries))
    }

    /// Whether `fit` has completed.
    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Number of documents the vectorizer was fit on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Vocabulary terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|index| self.idf[index])
    }

    /// The analyzer shared by fitting and transforming.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }
}
