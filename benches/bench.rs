//! Criterion benchmarks for the Parley chatbot.
//!
//! Covers the text analysis pipeline, TF-IDF fitting and projection,
//! model training and per-message classification.

use std::hint::black_box;
use std::path::PathBuf;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use parley::analysis::analyzer::{Analyzer, StandardAnalyzer};
use parley::chat::bot::ChatBot;
use parley::corpus::Corpus;
use parley::ml::intent_classifier::{self, ClassifierConfig, TfIdfVectorizer};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bundled_corpus() -> Corpus {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/intents.json");
    Corpus::load(path).unwrap()
}

/// Generate user messages for benchmarking.
fn generate_messages(count: usize) -> Vec<String> {
    let words = [
        "hello", "there", "how", "are", "you", "doing", "today", "tell", "me", "joke", "what",
        "is", "your", "name", "weather", "rain", "thanks", "bye", "money", "budget", "coding",
        "learn", "help", "please",
    ];

    (0..count)
        .map(|i| {
            let length = 2 + (i % 8);
            (0..length)
                .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Benchmark text analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = StandardAnalyzer::new().unwrap();
    let messages = generate_messages(100);

    group.bench_function("analyze_single_message", |b| {
        b.iter(|| {
            let terms = analyzer.terms(black_box(&messages[7]));
            black_box(terms)
        })
    });

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("analyze_batch_messages", |b| {
        b.iter(|| {
            for message in &messages {
                let _ = black_box(analyzer.terms(black_box(message)));
            }
        })
    });

    group.finish();
}

/// Benchmark TF-IDF fitting and projection.
fn bench_vectorizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf");

    let (patterns, _) = bundled_corpus().flatten();
    let analyzer: Arc<dyn Analyzer> = Arc::new(StandardAnalyzer::new().unwrap());

    group.bench_function("fit_bundled_corpus", |b| {
        b.iter(|| {
            let mut vectorizer = TfIdfVectorizer::new(Arc::clone(&analyzer));
            vectorizer.fit(black_box(&patterns)).unwrap();
            black_box(vectorizer)
        })
    });

    let mut vectorizer = TfIdfVectorizer::new(Arc::clone(&analyzer));
    vectorizer.fit(&patterns).unwrap();
    let messages = generate_messages(100);

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("transform_messages", |b| {
        b.iter(|| {
            for message in &messages {
                let _ = black_box(vectorizer.transform(black_box(message)));
            }
        })
    });

    group.finish();
}

/// Benchmark training and classification.
fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    group.sample_size(20); // Training runs full gradient descent

    let corpus = bundled_corpus();

    group.bench_function("train_bundled_corpus", |b| {
        b.iter(|| {
            let classifier =
                intent_classifier::train_on_corpus(black_box(&corpus), ClassifierConfig::default())
                    .unwrap();
            black_box(classifier)
        })
    });

    let classifier =
        intent_classifier::train_on_corpus(&corpus, ClassifierConfig::default()).unwrap();
    let messages = generate_messages(100);

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("classify_messages", |b| {
        b.iter(|| {
            for message in &messages {
                let _ = black_box(classifier.classify(black_box(message)));
            }
        })
    });

    let bot = ChatBot::new(corpus.clone(), Arc::new(classifier)).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    group.bench_function("respond_messages", |b| {
        b.iter(|| {
            for message in &messages {
                let _ = black_box(bot.respond(black_box(message), &mut rng));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_text_analysis, bench_vectorizer, bench_classifier);

criterion_main!(benches);
