//! Tokens produced by tokenizers and rewritten by filters.
//!
//! # Examples
//!
//! ```
//! use parley::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 1, 6, 11);
//! assert_eq!(token.text, "world");
//! assert_eq!(&"hello world"[token.start_offset..token.end_offset], "world");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One term of an analyzed message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,

    /// Index of the token within its stream.
    pub position: usize,

    /// Byte span in the source text. Filters keep it even when they
    /// rewrite `text`.
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Token {
    /// A token with no source span.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text, keeping position and span.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Lazily evaluated sequence of tokens flowing through an analyzer.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
