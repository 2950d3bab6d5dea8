//! # DataForge API
//!
//! The [`DataForge`] facade and the REST server built on it.
//!
//! ## REST endpoints
//!
//! | Method | Path                 | Purpose                                         |
//! |--------|----------------------|-------------------------------------------------|
//! | POST   | `/api/process-data`  | validate, transform and format `inputData`      |
//! | POST   | `/api/generate-data` | generate mock records and process them          |
//! | POST   | `/api/upload`        | accept a JSON array file (multipart `file`)     |
//! | GET    | `/api/health`        | liveness                                        |
//! | GET    | `/`                  | endpoint listing                                |
//!
//! ```rust
//! use dataforge_api::DataForge;
//! use dataforge_core::InputRecord;
//!
//! let forge = DataForge::default();
//! let json = forge
//!     .process_and_format(&[InputRecord::new("What is DevOps?")], None, None)
//!     .unwrap();
//! assert!(json.contains("what is devops?"));
//! ```

pub mod forge;
pub mod rest;

pub use forge::{DataForge, FormattedBatch};
pub use rest::{configure, RestApi, ENDPOINTS, MAX_GENERATE_COUNT, MAX_UPLOAD_BYTES};
