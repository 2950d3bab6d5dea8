//! # DataForge Synth
//!
//! Synthetic input records for demos and tests.
//!
//! ```rust
//! use dataforge_synth::{DataGenerator, MockDataGenerator};
//!
//! let records = MockDataGenerator::new().generate("Generate QA data about machine learning", 3);
//! assert_eq!(records.len(), 3);
//! assert!(records.iter().all(|r| r.embeddings.as_ref().map(|e| e.dim()) == Some(384)));
//! ```

pub mod generator;

pub use generator::{
    categorize, mock_embedding, DataGenerator, MockDataGenerator, DIFFICULTIES,
    QUESTION_TEMPLATES, SAMPLE_TOPICS,
};
