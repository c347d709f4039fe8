//! Conversation layer around the intent classifier.
//!
//! - [`bot::ChatBot`]: corpus + trained classifier, picks a response per message
//! - [`session::Session`]: one conversation, ends on a farewell response
//! - [`history::ChatLog`]: append-only CSV record of exchanges

pub mod bot;
pub mod history;
pub mod session;
