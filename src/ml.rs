//! Machine learning components for Parley.
//!
//! The only model is the intent classifier: trained once from the corpus at
//! startup, then shared read-only by every caller.

pub mod intent_classifier;
