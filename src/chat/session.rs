//! A single conversation with the bot.

use chrono::{DateTime, Local};
use rand::Rng;
use uuid::Uuid;

use crate::chat::bot::{ChatBot, Exchange};
use crate::error::{ParleyError, Result};

/// Responses that end a conversation, compared after normalization.
pub const FAREWELL_PHRASES: [&str; 3] = ["goodbye", "bye", "take care"];

/// Whether a response is a farewell.
///
/// Case, surrounding whitespace and trailing punctuation are ignored, so
/// "Goodbye!" and "take care." both count.
pub fn is_farewell(response: &str) -> bool {
    let normalized = response
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .trim_end()
        .to_lowercase();

    FAREWELL_PHRASES.contains(&normalized.as_str())
}

/// State of one conversation.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Local>,
    turns: usize,
    ended: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Local::now(),
            turns: 0,
            ended: false,
        };
        log::debug!("Started session {}", session.id);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Number of exchanges recorded so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Count an exchange, ending the session if its response is a farewell.
    pub fn record(&mut self, exchange: &Exchange) -> Result<()> {
        self.ensure_active()?;

        self.turns += 1;
        if is_farewell(&exchange.response) {
            self.ended = true;
            log::info!("Session {} ended after {} turns", self.id, self.turns);
        }
        Ok(())
    }

    /// Send one message to the bot and record the exchange.
    pub fn send<R: Rng + ?Sized>(
        &mut self,
        bot: &ChatBot,
        text: &str,
        rng: &mut R,
    ) -> Result<Exchange> {
        self.ensure_active()?;
        let exchange = bot.respond(text, rng)?;
        self.record(&exchange)?;
        Ok(exchange)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.ended {
            return Err(ParleyError::invalid_operation(format!(
                "session {} has already ended",
                self.id
            )));
        }
        Ok(())
    }
}
