use crate::vector::Embedding;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form record metadata
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A caller-supplied record awaiting processing
///
/// Only `content` is required. Records without an id get one derived from
/// their content during preprocessing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeddings: Option<Embedding>,
}

impl InputRecord {
    #[inline]
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_embeddings(mut self, embeddings: impl Into<Embedding>) -> Self {
        self.embeddings = Some(embeddings.into());
        self
    }

    /// The explicit id, treating an empty string as absent
    #[inline]
    pub fn explicit_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A fully-specified record produced by the pipeline
///
/// Field order here is the serialization order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalRecord {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub embeddings: Embedding,
    /// Unix epoch when absent from the input, e.g. hand-written existing datasets
    #[serde(default, with = "crate::timestamp")]
    pub processed_at: DateTime<Utc>,
}
