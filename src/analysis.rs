//! Text analysis module for Parley.
//!
//! Turns raw utterances into normalized terms for the vectorizer. The same
//! analyzer instance must be used when fitting and when classifying, so that
//! case and punctuation handling stay consistent.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
