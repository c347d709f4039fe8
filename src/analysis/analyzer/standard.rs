//! Standard analyzer used by the intent classifier.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer (`\b\w\w+\b`)
//! 2. LowercaseFilter
//!
//! No stop words are removed: in short utterances like "how are you" the
//! function words are most of the signal.
//!
//! # Examples
//!
//! ```
//! use parley::analysis::analyzer::analyzer::Analyzer;
//! use parley::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let terms = analyzer.terms("How are you?").unwrap();
//! assert_eq!(terms, vec!["how", "are", "you"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Regex tokenization followed by lowercasing.
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
    pub fn new() -> Result<Self> {
        Self::with_pattern(crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN)
    }

    /// Create a standard analyzer with a custom token pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::with_pattern(pattern)?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("standard");

        Ok(StandardAnalyzer { inner: analyzer })
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
