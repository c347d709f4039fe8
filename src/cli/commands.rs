//! Command implementations for Parley CLI.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chat::bot::{ChatBot, Exchange};
use crate::chat::history::{ChatLog, TIMESTAMP_FORMAT};
use crate::chat::session::Session;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::ml::intent_classifier::{self, ClassifierConfig, MLBasedIntentClassifier};

const FAREWELL_MESSAGE: &str = "Thank you for talking with me, have a nice day!";

/// Execute a CLI command.
pub fn execute_command(args: ParleyArgs) -> Result<()> {
    match &args.command {
        Command::Chat(chat_args) => run_chat(chat_args.clone(), &args),
        Command::Ask(ask_args) => ask(ask_args.clone(), &args),
        Command::History(history_args) => show_history(history_args.clone(), &args),
        Command::About => show_about(&args),
        Command::Evaluate(evaluate_args) => evaluate_corpus(evaluate_args.clone(), &args),
    }
}

/// Classifier configuration from `--config`, with `--seed` applied on top.
fn load_config(cli_args: &ParleyArgs) -> Result<ClassifierConfig> {
    let config = match &cli_args.config {
        Some(path) => ClassifierConfig::load(path)?,
        None => ClassifierConfig::default(),
    };

    Ok(match cli_args.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}

/// Load the corpus and train a bot on it.
///
/// The concrete classifier is returned alongside the bot for commands that
/// need more than a tag (probabilities, training statistics).
fn train_bot(cli_args: &ParleyArgs) -> Result<(ChatBot, Arc<MLBasedIntentClassifier>)> {
    let corpus = Corpus::load(&cli_args.intents)?;
    let config = load_config(cli_args)?;

    let classifier = Arc::new(intent_classifier::train_on_corpus(&corpus, config)?);
    let bot = ChatBot::new(corpus, classifier.clone())?;
    Ok((bot, classifier))
}

/// Random source for response selection; seeded when `--seed` is given.
fn response_rng(cli_args: &ParleyArgs) -> StdRng {
    match cli_args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn reply_result(exchange: &Exchange) -> ReplyResult {
    ReplyResult {
        input: exchange.user_input.clone(),
        tag: exchange.tag.clone(),
        response: exchange.response.clone(),
        timestamp: exchange.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        probabilities: None,
    }
}

/// Interactive conversation over stdin/stdout.
fn run_chat(args: ChatArgs, cli_args: &ParleyArgs) -> Result<()> {
    let (bot, _) = train_bot(cli_args)?;
    let log = if args.should_log() {
        Some(ChatLog::open(&cli_args.log_file)?)
    } else {
        None
    };

    let mut session = Session::new();
    let mut rng = response_rng(cli_args);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    converse(
        &bot,
        &mut session,
        log.as_ref(),
        stdin.lock(),
        &mut output,
        &mut rng,
        &cli_args.output_format,
    )?;

    match cli_args.output_format {
        OutputFormat::Human => {
            if session.is_ended() {
                writeln!(output, "{FAREWELL_MESSAGE}")?;
            }
        }
        OutputFormat::Json => {
            drop(output);
            output_result(
                "Conversation finished",
                &ChatSummary {
                    session_id: session.id().to_string(),
                    turns: session.turns(),
                    ended_by_farewell: session.is_ended(),
                },
                cli_args,
            )?;
        }
    }

    Ok(())
}

/// Read messages line by line until a farewell or end of input.
///
/// Blank lines are skipped. Each exchange is written to `output` and, when a
/// log is given, appended to it before the next line is read.
fn converse<I, W, R>(
    bot: &ChatBot,
    session: &mut Session,
    log: Option<&ChatLog>,
    input: I,
    output: &mut W,
    rng: &mut R,
    format: &OutputFormat,
) -> Result<()>
where
    I: BufRead,
    W: Write,
    R: Rng + ?Sized,
{
    if matches!(format, OutputFormat::Human) {
        writeln!(
            output,
            "Welcome to Parley. Type a message and press Enter (Ctrl-D to quit)."
        )?;
    }

    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let exchange = session.send(bot, text, rng)?;
        if let Some(log) = log {
            log.append(&exchange)?;
        }

        match format {
            OutputFormat::Human => writeln!(output, "Chatbot: {}", exchange.response)?,
            OutputFormat::Json => {
                writeln!(output, "{}", serde_json::to_string(&reply_result(&exchange))?)?
            }
        }
        output.flush()?;

        if session.is_ended() {
            break;
        }
    }

    Ok(())
}

/// Answer a single message.
fn ask(args: AskArgs, cli_args: &ParleyArgs) -> Result<()> {
    let (bot, classifier) = train_bot(cli_args)?;
    let mut rng = response_rng(cli_args);

    let exchange = bot.respond(&args.text, &mut rng)?;
    if args.should_log() {
        ChatLog::open(&cli_args.log_file)?.append(&exchange)?;
    }

    let mut result = reply_result(&exchange);
    if args.explain {
        let ranked = classifier.predict_proba(&args.text)?;
        result.probabilities = Some(
            ranked
                .into_iter()
                .map(|(tag, probability)| TagProbability { tag, probability })
                .collect(),
        );
    }

    output_result("Reply", &result, cli_args)
}

/// Show the logged conversation history.
fn show_history(args: HistoryArgs, cli_args: &ParleyArgs) -> Result<()> {
    let mut records = ChatLog::read(&cli_args.log_file)?;
    let total = records.len();

    if let Some(limit) = args.limit {
        records.drain(..total.saturating_sub(limit));
    }

    output_result(
        "Conversation history",
        &HistoryResult {
            path: cli_args.log_file.to_string_lossy().to_string(),
            total,
            records,
        },
        cli_args,
    )
}

/// Describe the project.
fn show_about(cli_args: &ParleyArgs) -> Result<()> {
    let info = AboutInfo {
        name: "Parley".to_string(),
        version: crate::VERSION.to_string(),
        description: "An intent-matching chatbot. Messages are mapped to intents with a \
                      TF-IDF vectorizer and a logistic regression classifier trained on \
                      the intent corpus, and answered with one of the intent's canned \
                      responses."
            .to_string(),
        features: vec![
            "Intent classification with TF-IDF features and logistic regression".to_string(),
            "Reproducible training and response selection with --seed".to_string(),
            "Conversation log in CSV for later review".to_string(),
            "Human-readable or JSON output".to_string(),
        ],
    };

    output_result("About", &info, cli_args)
}

/// Train on the corpus and report accuracy over its own patterns.
fn evaluate_corpus(args: EvaluateArgs, cli_args: &ParleyArgs) -> Result<()> {
    let (bot, classifier) = train_bot(cli_args)?;
    let corpus = bot.corpus();

    let mut evaluation = intent_classifier::evaluate(bot.classifier(), &corpus.samples())?;
    if !args.show_errors {
        evaluation.misclassified.clear();
    }

    let stats = classifier.model().training_stats();
    let report = EvaluationReport {
        intents: corpus.len(),
        patterns: evaluation.total,
        vocabulary_size: classifier.vectorizer().vocabulary_size(),
        correct: evaluation.correct,
        accuracy: evaluation.accuracy,
        iterations: stats.map(|s| s.iterations).unwrap_or(0),
        converged: stats.map(|s| s.converged).unwrap_or(false),
        final_loss: stats.map(|s| s.final_loss).unwrap_or(f64::NAN),
        training_time_ms: stats.map(|s| s.training_time_ms).unwrap_or(0),
        misclassified: evaluation.misclassified,
    };

    output_result("Evaluation", &report, cli_args)
}
