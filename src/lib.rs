//! # DataForge
//!
//! Turns loosely-structured records into vector-search-ready datasets.
//!
//! Every record goes through validation, text normalization and id
//! generation, then comes out with a 384-dimension embedding and a
//! processing timestamp. New batches can be checked against an existing
//! dataset for id, schema, type and dimension conflicts, and results are
//! serialized as JSON or CSV.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! dataforge create --prompt "Generate QA data about machine learning" --count 5 --format csv
//! dataforge add --input new.json --existing dataset.json --output merged.json
//! dataforge serve --port 3001
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use dataforge::prelude::*;
//!
//! let forge = DataForge::default();
//! let batch = forge
//!     .process_data(&[InputRecord::new("  What is   Machine Learning? ")], None, None)
//!     .unwrap();
//!
//! let record = &batch.records[0];
//! assert_eq!(record.content, "what is machine learning?");
//! assert_eq!(record.embeddings.dim(), EMBEDDING_DIM);
//! ```
//!
//! ## Crate Structure
//!
//! - [`dataforge-core`](https://docs.rs/dataforge-core) - Records, embeddings, hashing, config, errors
//! - [`dataforge-pipeline`](https://docs.rs/dataforge-pipeline) - Validation, preprocessing, transformation, consistency
//! - [`dataforge-output`](https://docs.rs/dataforge-output) - JSON and CSV formatting
//! - [`dataforge-synth`](https://docs.rs/dataforge-synth) - Mock record generation
//! - [`dataforge-api`](https://docs.rs/dataforge-api) - The `DataForge` facade and REST API

pub mod io;

// Re-export core types
pub use dataforge_core::{
    generate_id, normalize_vector, string_hash, timestamp, CanonicalRecord, Embedding, Error,
    InputRecord, Metadata, OutputFormat, ProcessingConfig, Result, ValidationIssue,
    ValidationResult, EMBEDDING_DIM,
};

// Re-export pipeline stages
pub use dataforge_pipeline::{
    ConflictType, ConsistencyChecker, ConsistencyConflict, ConsistencyResult, Pipeline,
    ProcessedBatch, StandardConsistencyChecker, StandardTransformer, StandardValidator,
    Transformer, Validator,
};

// Re-export output, generation and API
pub use dataforge_api::{DataForge, FormattedBatch, RestApi};
pub use dataforge_output::format_data;
pub use dataforge_synth::{DataGenerator, MockDataGenerator};

pub use io::{read_config_file, read_dataset_file, read_input_file, write_output};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CanonicalRecord, DataForge, Embedding, Error, InputRecord, Metadata, OutputFormat,
        Pipeline, ProcessedBatch, ProcessingConfig, Result, EMBEDDING_DIM,
    };
}
