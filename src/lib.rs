//! # Parley
//!
//! An intent-matching chatbot.
//!
//! Incoming messages are tokenized, projected into TF-IDF feature space and
//! classified with a multinomial logistic regression model trained on the
//! patterns of an intent corpus. The bot answers with one of the matched
//! intent's canned responses.
//!
//! ## Modules
//!
//! - [`analysis`]: tokenizer and token filter pipeline
//! - [`corpus`]: intent corpus loading and validation
//! - [`ml`]: TF-IDF vectorizer, logistic regression and the classifier seam
//! - [`chat`]: bot, conversation session and CSV chat log
//! - [`cli`]: command line front end

pub mod analysis;
pub mod chat;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod ml;

pub mod prelude {
    pub use crate::chat::bot::{ChatBot, Exchange};
    pub use crate::chat::history::{ChatLog, ChatRecord};
    pub use crate::chat::session::Session;
    pub use crate::corpus::{Corpus, Intent};
    pub use crate::error::{ParleyError, Result};
    pub use crate::ml::intent_classifier::{ClassifierConfig, IntentClassifier};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
