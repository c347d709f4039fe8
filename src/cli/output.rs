//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::chat::history::ChatRecord;
use crate::cli::args::{OutputFormat, ParleyArgs};
use crate::error::Result;
use crate::ml::intent_classifier::Misclassification;

/// Result structure for a single exchange.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyResult {
    pub input: String,
    pub tag: String,
    pub response: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Vec<TagProbability>>,
}

/// Probability the classifier assigns to one tag.
#[derive(Debug, Serialize, Deserialize)]
pub struct TagProbability {
    pub tag: String,
    pub probability: f64,
}

/// Result structure for an interactive conversation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatSummary {
    pub session_id: String,
    pub turns: usize,
    pub ended_by_farewell: bool,
}

/// Logged conversation history.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub path: String,
    pub total: usize,
    pub records: Vec<ChatRecord>,
}

/// Project description.
#[derive(Debug, Serialize, Deserialize)]
pub struct AboutInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Training-set evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub intents: usize,
    pub patterns: usize,
    pub vocabulary_size: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub iterations: usize,
    pub converged: bool,
    pub final_loss: f64,
    pub training_time_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub misclassified: Vec<Misclassification>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &ParleyArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &ParleyArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("ReplyResult") => {
            output_reply_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("HistoryResult") => {
            output_history_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("AboutInfo") => output_about_human(&value, args),
        _ if std::any::type_name::<T>().contains("EvaluationReport") => {
            output_evaluation_human(&value, args)
        }
        _ => {
            // Generic output for other types
            output_generic_human(&value, args)
        }
    }
}

/// Output a reply in human format.
fn output_reply_human(value: &serde_json::Value, args: &ParleyArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        if let Some(response) = obj.get("response").and_then(|r| r.as_str()) {
            println!("{response}");
        }

        if args.verbosity() > 1
            && let Some(tag) = obj.get("tag").and_then(|t| t.as_str())
        {
            println!("  (intent: {tag})");
        }

        if let Some(probabilities) = obj.get("probabilities").and_then(|p| p.as_array()) {
            println!();
            println!("Intent probabilities:");
            println!("─────────────────────");
            for entry in probabilities {
                let tag = entry.get("tag").and_then(|t| t.as_str()).unwrap_or("unknown");
                let probability = entry
                    .get("probability")
                    .and_then(|p| p.as_f64())
                    .unwrap_or(0.0);
                println!("  {tag:<20} {}", format_percent(probability));
            }
        }
    }
    Ok(())
}

/// Output chat history in human format.
fn output_history_human(value: &serde_json::Value, _args: &ParleyArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Conversation History:");
        println!("═════════════════════");

        let records = obj
            .get("records")
            .and_then(|r| r.as_array())
            .map(Vec::as_slice)
            .unwrap_or_default();

        if records.is_empty() {
            println!("No conversations logged yet.");
        }

        for record in records {
            let field = |name: &str| record.get(name).and_then(|v| v.as_str()).unwrap_or("");
            println!();
            println!("User: {}", field("User_input"));
            println!("Chatbot: {}", field("Chatbot Response"));
            println!("Timestamp: {}", field("Timestamp"));
            println!("─────────────");
        }

        if let Some(total) = obj.get("total").and_then(|t| t.as_u64()) {
            println!();
            println!("Total exchanges: {total}");
        }
    }
    Ok(())
}

/// Output project information in human format.
fn output_about_human(value: &serde_json::Value, _args: &ParleyArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        let name = obj.get("name").and_then(|n| n.as_str()).unwrap_or("parley");
        let version = obj.get("version").and_then(|v| v.as_str()).unwrap_or("");
        println!("{name} {version}");
        println!("═════════════");

        if let Some(description) = obj.get("description").and_then(|d| d.as_str()) {
            println!();
            println!("{description}");
        }

        if let Some(features) = obj.get("features").and_then(|f| f.as_array()) {
            println!();
            for feature in features.iter().filter_map(|f| f.as_str()) {
                println!("- {feature}");
            }
        }
    }
    Ok(())
}

/// Output an evaluation report in human format.
fn output_evaluation_human(value: &serde_json::Value, _args: &ParleyArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Training Set Evaluation:");
        println!("════════════════════════");

        if let Some(intents) = obj.get("intents").and_then(|i| i.as_u64()) {
            println!("Intents: {intents}");
        }
        if let Some(patterns) = obj.get("patterns").and_then(|p| p.as_u64()) {
            println!("Patterns: {patterns}");
        }
        if let Some(vocabulary) = obj.get("vocabulary_size").and_then(|v| v.as_u64()) {
            println!("Vocabulary: {vocabulary} terms");
        }
        if let Some(accuracy) = obj.get("accuracy").and_then(|a| a.as_f64()) {
            let correct = obj.get("correct").and_then(|c| c.as_u64()).unwrap_or(0);
            println!("Accuracy: {} ({correct} correct)", format_percent(accuracy));
        }

        println!();
        println!("Training:");
        println!("─────────");
        if let Some(iterations) = obj.get("iterations").and_then(|i| i.as_u64()) {
            let converged = obj
                .get("converged")
                .and_then(|c| c.as_bool())
                .unwrap_or(false);
            let status = if converged { "converged" } else { "not converged" };
            println!("Iterations: {iterations} ({status})");
        }
        if let Some(loss) = obj.get("final_loss").and_then(|l| l.as_f64()) {
            println!("Final loss: {loss:.4}");
        }
        if let Some(duration) = obj.get("training_time_ms").and_then(|d| d.as_u64()) {
            println!("Training time: {duration}ms");
        }

        if let Some(misclassified) = obj.get("misclassified").and_then(|m| m.as_array()) {
            println!();
            println!("Misclassified:");
            println!("──────────────");
            for miss in misclassified {
                let field = |name: &str| miss.get(name).and_then(|v| v.as_str()).unwrap_or("");
                println!(
                    "  {:?}: expected {}, got {}",
                    field("text"),
                    field("expected"),
                    field("predicted")
                );
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &ParleyArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ParleyArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format a fraction in [0, 1] as a percentage.
fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.9375), "93.8%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("test".to_string())),
            "test"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&serde_json::Value::Bool(false)), "false");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
        assert_eq!(
            format_value(&serde_json::json!(["a", 1])),
            "[a, 1]"
        );
    }

    #[test]
    fn test_reply_serialization_skips_missing_probabilities() {
        let reply = ReplyResult {
            input: "hi".to_string(),
            tag: "greeting".to_string(),
            response: "Hello!".to_string(),
            timestamp: "09-03-2024 14:05:07".to_string(),
            probabilities: None,
        };

        let value = serde_json::to_value(&reply).unwrap();
        assert!(value.get("probabilities").is_none());
        assert_eq!(value["response"], "Hello!");
    }

    #[test]
    fn test_history_uses_log_column_names() {
        let history = HistoryResult {
            path: "chat_log.csv".to_string(),
            total: 1,
            records: vec![ChatRecord {
                user_input: "hi".to_string(),
                response: "Hello!".to_string(),
                timestamp: "09-03-2024 14:05:07".to_string(),
            }],
        };

        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value["records"][0]["User_input"], "hi");
        assert_eq!(value["records"][0]["Chatbot Response"], "Hello!");
    }
}
