//! # DataForge Core
//!
//! Core library for the DataForge dataset pipeline.
//!
//! This crate provides the fundamental data structures and primitives:
//!
//! - [`InputRecord`] - A loosely-specified record supplied by a caller
//! - [`CanonicalRecord`] - A fully-specified record produced by the pipeline
//! - [`Embedding`] - Dense vector with unit-length normalization
//! - [`string_hash`] / [`generate_id`] - Deterministic 32-bit content hashing
//! - [`ProcessingConfig`] - Pipeline configuration with named defaults
//! - [`ValidationResult`] - Accumulated validation findings
//!
//! ## Example
//!
//! ```rust
//! use dataforge_core::{generate_id, Embedding, InputRecord};
//!
//! let record = InputRecord::new("What is machine learning?")
//!     .with_embeddings(vec![1.0, 2.0, 2.0]);
//!
//! let id = generate_id(&record.content, Some(0));
//! assert!(id.ends_with("-0"));
//!
//! let unit = Embedding::new(vec![3.0, 4.0]).normalized();
//! assert!((unit.magnitude() - 1.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod record;
pub mod text;
pub mod timestamp;
pub mod validation;
pub mod vector;

pub use config::{OutputFormat, ProcessingConfig};
pub use error::{Error, Result};
pub use hash::{generate_id, string_hash, to_base36};
pub use record::{CanonicalRecord, InputRecord, Metadata};
pub use text::words;
pub use validation::{ValidationIssue, ValidationResult, BATCH_INDEX};
pub use vector::{normalize_vector, Embedding, EMBEDDING_DIM};
