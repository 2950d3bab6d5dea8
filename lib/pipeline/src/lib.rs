//! # DataForge Pipeline
//!
//! Batch processing stages that turn loosely-structured input records into
//! vector-search-ready canonical records.
//!
//! ## Stages
//!
//! - **Validation**: structural and semantic checks; all findings are collected
//! - **Preprocessing**: text normalization, id generation, metadata cleanup
//! - **Transformation**: canonical records with 384-dimension embeddings
//! - **Consistency**: conflicts between a new batch and an existing dataset
//!
//! ## Example
//!
//! ```rust
//! use dataforge_core::{InputRecord, ProcessingConfig};
//! use dataforge_pipeline::Pipeline;
//!
//! let pipeline = Pipeline::default();
//! let config = ProcessingConfig::resolve(None).unwrap();
//!
//! let batch = pipeline
//!     .process(&[InputRecord::new("What is machine learning?")], &config, None)
//!     .unwrap();
//!
//! assert_eq!(batch.records[0].content, "what is machine learning?");
//! assert_eq!(batch.records[0].embeddings.dim(), 384);
//! ```
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Validator  │────>│ Transformer │────>│ Consistency │
//! │ (fail-fast) │     │ (preprocess)│     │ (advisory)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod consistency;
pub mod pipeline;
pub mod preprocess;
pub mod transform;
pub mod validate;

pub use consistency::{
    ConflictType, ConsistencyChecker, ConsistencyConflict, ConsistencyResult,
    StandardConsistencyChecker, ValueKind,
};
pub use pipeline::{Pipeline, ProcessedBatch};
pub use preprocess::{
    clean_metadata, normalize_text, preprocess, preprocess_record, PreprocessOptions,
};
pub use transform::{content_embedding, StandardTransformer, Transformer};
pub use validate::{decode_records, DecodedBatch, StandardValidator, Validator};
