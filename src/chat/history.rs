//! CSV chat log.
//!
//! One row per exchange under the header
//! `User_input,Chatbot Response,Timestamp`. The file is created with its
//! header on first use and only ever appended to afterwards.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::chat::bot::Exchange;
use crate::error::Result;

/// Column names written as the first row of a new log.
pub const HEADER: [&str; 3] = ["User_input", "Chatbot Response", "Timestamp"];

/// `chrono` format of the timestamp column (day-month-year).
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// A single logged row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    #[serde(rename = "User_input")]
    pub user_input: String,
    #[serde(rename = "Chatbot Response")]
    pub response: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl From<&Exchange> for ChatRecord {
    fn from(exchange: &Exchange) -> Self {
        Self {
            user_input: exchange.user_input.clone(),
            response: exchange.response.clone(),
            timestamp: exchange.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Append-only chat log backed by a CSV file.
pub struct ChatLog {
    path: PathBuf,
    writer: Mutex<csv::Writer<std::fs::File>>,
}

impl std::fmt::Debug for ChatLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatLog").field("path", &self.path).finish()
    }
}

impl ChatLog {
    /// Open a log for appending, writing the header if the file is new or empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let is_new = std::fs::metadata(&path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(HEADER)?;
            writer.flush()?;
            log::info!("Created chat log at {}", path.display());
        }

        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    /// Append one exchange and flush it to disk.
    pub fn append(&self, exchange: &Exchange) -> Result<()> {
        self.append_record(&ChatRecord::from(exchange))
    }

    pub fn append_record(&self, record: &ChatRecord) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// All rows logged so far, oldest first.
    pub fn history(&self) -> Result<Vec<ChatRecord>> {
        Self::read(&self.path)
    }

    /// Read the rows of a log file. A missing file has no history.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<ChatRecord>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
