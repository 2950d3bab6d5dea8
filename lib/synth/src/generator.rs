//! Mock question generator
//!
//! Produces plausible Q&A-style input records from a fixed topic and
//! template vocabulary. Embeddings come from [`mock_embedding`], which is
//! not the transformer's content embedding: it hashes `word + position`
//! over all 384 slots, cycling through the words, with a wider output range.

use chrono::Utc;
use dataforge_core::{
    string_hash, timestamp, words, Embedding, InputRecord, Metadata, EMBEDDING_DIM,
};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::json;
use tracing::info;

pub const SAMPLE_TOPICS: [&str; 10] = [
    "machine learning",
    "artificial intelligence",
    "data science",
    "software engineering",
    "web development",
    "database design",
    "cloud computing",
    "cybersecurity",
    "mobile development",
    "DevOps",
];

pub const QUESTION_TEMPLATES: [&str; 8] = [
    "What is {topic}?",
    "How does {topic} work?",
    "What are the benefits of {topic}?",
    "What are the best practices for {topic}?",
    "How to get started with {topic}?",
    "What are common challenges in {topic}?",
    "What tools are used for {topic}?",
    "How to learn {topic} effectively?",
];

pub const DIFFICULTIES: [&str; 3] = ["beginner", "intermediate", "advanced"];

/// Produces input records from a free-text prompt
pub trait DataGenerator: Send + Sync {
    fn generate(&self, prompt: &str, count: usize) -> Vec<InputRecord>;
}

/// Template-based generator backed by the thread-local RNG
#[derive(Debug, Clone, Default)]
pub struct MockDataGenerator;

impl MockDataGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate with a caller-supplied RNG, e.g. a seeded one in tests
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        prompt: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<InputRecord> {
        info!(count, prompt, "generating mock records");

        (0..count)
            .map(|index| {
                let topic = pick(rng, &SAMPLE_TOPICS);
                let template = pick(rng, &QUESTION_TEMPLATES);
                let difficulty = pick(rng, &DIFFICULTIES);
                let content = template.replace("{topic}", topic);

                let now = Utc::now();
                let mut metadata = Metadata::new();
                metadata.insert("topic".to_string(), json!(topic));
                metadata.insert("generated_at".to_string(), json!(timestamp::format(&now)));
                metadata.insert("prompt".to_string(), json!(prompt));
                metadata.insert("mock_index".to_string(), json!(index));
                metadata.insert("difficulty".to_string(), json!(difficulty));
                metadata.insert("category".to_string(), json!(categorize(&content)));

                let embeddings = mock_embedding(&content);

                InputRecord::new(content)
                    .with_id(format!("mock-{}-{}", now.timestamp_millis(), index))
                    .with_metadata(metadata)
                    .with_embeddings(embeddings)
            })
            .collect()
    }
}

impl DataGenerator for MockDataGenerator {
    fn generate(&self, prompt: &str, count: usize) -> Vec<InputRecord> {
        self.generate_with_rng(prompt, count, &mut rand::rng())
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Keyword category of a question
pub fn categorize(content: &str) -> &'static str {
    let lower = content.to_lowercase();

    if lower.contains("what is") || lower.contains("what are") {
        "definition"
    } else if lower.contains("how to") || lower.contains("how does") {
        "instruction"
    } else if lower.contains("best practices") || lower.contains("benefits") {
        "guidance"
    } else {
        "general"
    }
}

/// Embedding for generated records
///
/// Slot `i` hashes the `i mod n`-th lower-cased word with `i` appended and
/// maps it to `(hash mod 2000 - 1000) / 1000`. Unit-normalized.
pub fn mock_embedding(content: &str) -> Embedding {
    let lower = content.to_lowercase();
    let mut parts: Vec<&str> = words(&lower).collect();
    if parts.is_empty() {
        parts.push("");
    }

    let data = (0..EMBEDDING_DIM)
        .map(|i| {
            let word = parts[i % parts.len()];
            let hash = string_hash(&format!("{}{}", word, i));
            (f64::from(hash % 2000) - 1000.0) / 1000.0
        })
        .collect();

    Embedding::new(data).normalized()
}
