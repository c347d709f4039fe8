//! End-to-end conversation scenarios

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use parley::chat::session::is_farewell;
use parley::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

fn greeting_goodbye_corpus() -> Result<Corpus> {
    Corpus::from_json_str(
        r#"[
            {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!", "Hi there!"]},
            {"tag": "goodbye", "patterns": ["bye", "goodbye"], "responses": ["Goodbye!", "Take care!"]}
        ]"#,
    )
}

#[test]
fn test_greeting_then_goodbye_ends_session() -> Result<()> {
    let bot = ChatBot::train(greeting_goodbye_corpus()?, ClassifierConfig::default())?;
    let mut rng = StdRng::seed_from_u64(2024);
    let mut session = Session::new();

    assert_eq!(bot.classify("hello")?, "greeting");
    assert_eq!(bot.classify("goodbye")?, "goodbye");

    let hello = session.send(&bot, "hello", &mut rng)?;
    assert_eq!(hello.tag, "greeting");
    assert!(["Hello!", "Hi there!"].contains(&hello.response.as_str()));
    assert!(!session.is_ended());

    let goodbye = session.send(&bot, "goodbye", &mut rng)?;
    assert_eq!(goodbye.tag, "goodbye");
    assert!(is_farewell(&goodbye.response));
    assert!(session.is_ended());
    assert_eq!(session.turns(), 2);

    let after = session.send(&bot, "hello", &mut rng);
    assert!(matches!(after, Err(ParleyError::InvalidOperation(_))));

    Ok(())
}

#[test]
fn test_responses_belong_to_matched_intent() -> Result<()> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/intents.json");
    let bot = ChatBot::train(Corpus::load(path)?, ClassifierConfig::default())?;
    let mut rng = StdRng::seed_from_u64(7);

    for message in ["hi", "thanks a lot", "tell me a joke", "zzyxqq_unseen_token", ""] {
        for _ in 0..10 {
            let exchange = bot.respond(message, &mut rng)?;
            let intent = bot.corpus().intent(&exchange.tag).unwrap();
            assert!(intent.responses.contains(&exchange.response));
        }
    }

    Ok(())
}

#[test]
fn test_every_response_is_reachable() -> Result<()> {
    let bot = ChatBot::train(greeting_goodbye_corpus()?, ClassifierConfig::default())?;
    let mut rng = StdRng::seed_from_u64(99);

    let seen: HashSet<String> = (0..100)
        .map(|_| bot.respond("hi", &mut rng).map(|e| e.response))
        .collect::<Result<_>>()?;

    assert_eq!(seen.len(), 2);

    Ok(())
}

#[test]
fn test_conversation_is_logged() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs").join("chat_log.csv");

    let bot = ChatBot::train(greeting_goodbye_corpus()?, ClassifierConfig::default())?;
    let log = ChatLog::open(&log_path)?;
    let mut rng = StdRng::seed_from_u64(1);
    let mut session = Session::new();

    for message in ["hi", "hello, again", "bye"] {
        let exchange = session.send(&bot, message, &mut rng)?;
        log.append(&exchange)?;
    }

    let history = ChatLog::read(&log_path)?;
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].user_input, "hello, again");
    assert!(is_farewell(&history[2].response));
    for record in &history {
        assert!(chrono::NaiveDateTime::parse_from_str(&record.timestamp, "%d-%m-%Y %H:%M:%S").is_ok());
    }

    Ok(())
}

#[test]
fn test_concurrent_use_of_shared_bot_and_log() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let bot = Arc::new(ChatBot::train(
        greeting_goodbye_corpus()?,
        ClassifierConfig::default(),
    )?);
    let log = Arc::new(ChatLog::open(temp_dir.path().join("chat_log.csv"))?);

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let bot = Arc::clone(&bot);
            let log = Arc::clone(&log);
            thread::spawn(move || -> Result<()> {
                let mut rng = StdRng::seed_from_u64(worker);
                for _ in 0..25 {
                    let exchange = bot.respond("hello", &mut rng)?;
                    log.append(&exchange)?;
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap()?;
    }

    let history = log.history()?;
    assert_eq!(history.len(), 100);
    assert!(history.iter().all(|r| r.user_input == "hello"));

    Ok(())
}
