//! Conversion of input records into canonical records

use crate::preprocess::{preprocess, PreprocessOptions};
use chrono::{DateTime, Utc};
use dataforge_core::{
    string_hash, words, CanonicalRecord, Embedding, Error, InputRecord, ProcessingConfig, Result,
    EMBEDDING_DIM,
};
use tracing::debug;

/// Turns input records into canonical records
pub trait Transformer: Send + Sync {
    fn transform(
        &self,
        records: &[InputRecord],
        config: &ProcessingConfig,
    ) -> Result<Vec<CanonicalRecord>>;
}

/// Default transformer with hash-derived fallback embeddings
#[derive(Debug, Clone, Default)]
pub struct StandardTransformer;

impl StandardTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Transform with an explicit batch timestamp
    pub fn transform_at(
        &self,
        records: &[InputRecord],
        config: &ProcessingConfig,
        processed_at: DateTime<Utc>,
    ) -> Result<Vec<CanonicalRecord>> {
        let options = PreprocessOptions {
            normalize_text: true,
            normalize_embeddings: config.normalize_embeddings,
            generate_missing_ids: true,
        };
        let preprocessed = preprocess(records, &options);

        let mut rows = Vec::with_capacity(preprocessed.len());
        for item in preprocessed {
            let Some(id) = item.id.filter(|id| !id.is_empty()) else {
                return Err(Error::Transform(
                    "id is required for transformation".to_string(),
                ));
            };

            let embeddings = match item.embeddings {
                Some(embeddings) => embeddings.resized(EMBEDDING_DIM),
                None => content_embedding(&item.content),
            };

            rows.push(CanonicalRecord {
                id,
                content: item.content,
                metadata: item.metadata.unwrap_or_default(),
                embeddings,
                processed_at,
            });
        }

        debug!(records = rows.len(), %processed_at, "transformed batch");
        Ok(rows)
    }
}

impl Transformer for StandardTransformer {
    fn transform(
        &self,
        records: &[InputRecord],
        config: &ProcessingConfig,
    ) -> Result<Vec<CanonicalRecord>> {
        self.transform_at(records, config, Utc::now())
    }
}

/// Fallback embedding for records that arrive without one
///
/// Word `i` (up to the embedding dimension) sets component `i` to
/// `(hash(word) mod 1000) / 1000 - 0.5`; the rest stay zero. The result is
/// unit-normalized unless it is all zeros.
pub fn content_embedding(content: &str) -> Embedding {
    let mut vector = Embedding::zeros(EMBEDDING_DIM);
    let slots = vector.as_mut_slice();

    for (i, word) in words(content).take(EMBEDDING_DIM).enumerate() {
        let hash = string_hash(word);
        slots[i % EMBEDDING_DIM] = f64::from(hash % 1000) / 1000.0 - 0.5;
    }

    vector.normalize();
    vector
}
