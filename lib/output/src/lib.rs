//! # DataForge Output
//!
//! Serializes canonical records for interchange.
//!
//! - **json**: pretty-printed array, fields in `id, content, metadata, embeddings, processed_at` order
//! - **csv**: `id,content,embeddings,processed_at,metadata` with JSON-encoded vector and metadata cells
//!
//! ```rust
//! use dataforge_core::{OutputFormat, ProcessingConfig};
//! use dataforge_output::format_data;
//!
//! let config = ProcessingConfig::default().with_output_format(OutputFormat::Csv);
//! assert_eq!(format_data(&[], &config).unwrap(), "");
//! ```

pub mod format;

pub use format::{escape_csv_field, format_csv, format_data, format_json, CSV_HEADERS};
