//! Command line argument parsing for Parley CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parley - An intent-matching chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "parley")]
#[command(about = "An intent-matching chatbot built on TF-IDF and logistic regression")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Parley Contributors")]
#[command(long_about = None)]
pub struct ParleyArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Intent corpus (JSON)
    #[arg(
        long,
        value_name = "INTENTS_FILE",
        default_value = "data/intents.json",
        env = "PARLEY_INTENTS",
        global = true
    )]
    pub intents: PathBuf,

    /// Chat log (CSV)
    #[arg(
        long = "log",
        value_name = "LOG_FILE",
        default_value = "chat_log.csv",
        env = "PARLEY_LOG",
        global = true
    )]
    pub log_file: PathBuf,

    /// Classifier configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Seed for training and response selection
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ParleyArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start an interactive conversation
    Chat(ChatArgs),

    /// Send a single message
    Ask(AskArgs),

    /// Show logged conversations
    History(HistoryArgs),

    /// Describe the project
    About,

    /// Report accuracy on the training corpus
    Evaluate(EvaluateArgs),
}

/// Arguments for an interactive conversation
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Don't write exchanges to the chat log
    #[arg(long)]
    pub no_log: bool,
}

/// Arguments for a single message
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// Message text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Don't write the exchange to the chat log
    #[arg(long)]
    pub no_log: bool,

    /// Include ranked tag probabilities
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for showing the chat log
#[derive(Parser, Debug, Clone)]
pub struct HistoryArgs {
    /// Show only the most recent entries
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// List every misclassified pattern
    #[arg(long)]
    pub show_errors: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl ChatArgs {
    /// Check if exchanges should be logged
    pub fn should_log(&self) -> bool {
        !self.no_log
    }
}

impl AskArgs {
    /// Check if the exchange should be logged
    pub fn should_log(&self) -> bool {
        !self.no_log
    }
}
