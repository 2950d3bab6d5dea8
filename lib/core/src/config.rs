use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialization target for processed records
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    /// Recognized but not implemented
    Parquet,
    /// Anything else; formatted as JSON
    Other(String),
}

impl OutputFormat {
    pub fn as_str(&self) -> &str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
            OutputFormat::Other(s) => s,
        }
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "parquet" => OutputFormat::Parquet,
            _ => OutputFormat::Other(s.to_string()),
        }
    }
}

impl From<String> for OutputFormat {
    fn from(s: String) -> Self {
        OutputFormat::from(s.as_str())
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline configuration
///
/// Missing fields take their defaults when deserialized, so `{}` is a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Reserved. Accepted and checked, but records are never chunked.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_enable_validation")]
    pub enable_validation: bool,
    #[serde(default)]
    pub normalize_embeddings: bool,
}

fn default_batch_size() -> usize {
    100
}

fn default_enable_validation() -> bool {
    true
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            batch_size: default_batch_size(),
            enable_validation: default_enable_validation(),
            normalize_embeddings: false,
        }
    }
}

impl ProcessingConfig {
    /// Apply defaults to an optional caller config and reject invalid values
    ///
    /// Entry points call this once; everything downstream takes the
    /// resolved config by reference.
    pub fn resolve(config: Option<ProcessingConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();
        if config.batch_size == 0 {
            return Err(Error::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_normalize_embeddings(mut self, normalize: bool) -> Self {
        self.normalize_embeddings = normalize;
        self
    }
}
