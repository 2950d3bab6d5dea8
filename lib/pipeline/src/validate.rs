//! Input validation
//!
//! Two layers: [`decode_records`] checks the shape of loosely-typed JSON
//! items and turns the well-formed ones into [`InputRecord`]s, then a
//! [`Validator`] checks the decoded records for semantic problems. Neither
//! layer stops at the first finding.

use ahash::AHashMap;
use dataforge_core::{
    InputRecord, ValidationIssue, ValidationResult, BATCH_INDEX, EMBEDDING_DIM,
};
use serde_json::Value;
use tracing::debug;

/// Checks a batch of records for well-formedness
pub trait Validator: Send + Sync {
    fn validate(&self, records: &[InputRecord]) -> ValidationResult;
}

/// Default validator
#[derive(Debug, Clone)]
pub struct StandardValidator {
    expected_dim: usize,
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self {
            expected_dim: EMBEDDING_DIM,
        }
    }
}

impl StandardValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimension that supplied embeddings are expected to have
    pub fn expected_dim(&self) -> usize {
        self.expected_dim
    }

    fn check_record(
        &self,
        index: usize,
        record: &InputRecord,
        errors: &mut Vec<ValidationIssue>,
        warnings: &mut Vec<ValidationIssue>,
    ) {
        if record.content.trim().is_empty() {
            warnings.push(ValidationIssue::at(
                index,
                "content",
                "content is empty or whitespace-only",
            ));
        }

        let Some(embeddings) = &record.embeddings else {
            return;
        };

        if embeddings.is_empty() {
            warnings.push(ValidationIssue::at(
                index,
                "embeddings",
                "embeddings array is empty",
            ));
        } else if embeddings.dim() != self.expected_dim {
            warnings.push(ValidationIssue::at(
                index,
                "embeddings",
                format!(
                    "embeddings have {} dimensions; expected {}",
                    embeddings.dim(),
                    self.expected_dim
                ),
            ));
        }

        if !embeddings.is_finite() {
            errors.push(ValidationIssue::at(
                index,
                "embeddings",
                "embeddings contain non-finite values",
            ));
        }
    }
}

impl Validator for StandardValidator {
    fn validate(&self, records: &[InputRecord]) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for (index, record) in records.iter().enumerate() {
            self.check_record(index, record, &mut errors, &mut warnings);
        }

        for id in find_duplicate_ids(records) {
            errors.push(ValidationIssue::new(
                BATCH_INDEX,
                "id",
                format!("duplicate id found: {}", id),
            ));
        }

        debug!(
            records = records.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "validated batch"
        );

        ValidationResult::new(errors, warnings)
    }
}

/// Ids that occur more than once, each reported once in order of its second occurrence
fn find_duplicate_ids(records: &[InputRecord]) -> Vec<&str> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    let mut duplicates = Vec::new();

    for id in records.iter().filter_map(InputRecord::explicit_id) {
        let count = counts.entry(id).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(id);
        }
    }

    duplicates
}

/// Result of decoding raw JSON items
#[derive(Debug, Clone, Default)]
pub struct DecodedBatch {
    /// Records that passed the structural checks
    pub records: Vec<InputRecord>,
    /// Position in the raw batch of each decoded record
    pub positions: Vec<usize>,
    /// Structural findings, indexed by raw position
    pub result: ValidationResult,
}

impl DecodedBatch {
    /// True when every raw item decoded
    pub fn is_complete(&self) -> bool {
        self.result.errors.is_empty()
    }
}

/// Structurally check loosely-typed items and decode the well-formed ones
pub fn decode_records(items: &[Value]) -> DecodedBatch {
    let mut batch = DecodedBatch::default();
    let mut errors = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let before = errors.len();
        check_shape(index, item, &mut errors);
        if errors.len() > before {
            continue;
        }

        match serde_json::from_value::<InputRecord>(item.clone()) {
            Ok(record) => {
                batch.records.push(record);
                batch.positions.push(index);
            }
            Err(e) => errors.push(ValidationIssue::at(index, "record", e.to_string())),
        }
    }

    batch.result = ValidationResult::new(errors, Vec::new());
    batch
}

fn check_shape(index: usize, item: &Value, errors: &mut Vec<ValidationIssue>) {
    let Some(obj) = item.as_object() else {
        errors.push(ValidationIssue::at(index, "record", "record must be an object"));
        return;
    };

    match obj.get("id") {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => errors.push(ValidationIssue::at(index, "id", "id must be a string")),
    }

    match obj.get("content") {
        Some(Value::String(_)) => {}
        None | Some(Value::Null) => {
            errors.push(ValidationIssue::at(index, "content", "content is required"))
        }
        Some(_) => errors.push(ValidationIssue::at(
            index,
            "content",
            "content must be a string",
        )),
    }

    match obj.get("metadata") {
        None | Some(Value::Null) | Some(Value::Object(_)) => {}
        Some(_) => errors.push(ValidationIssue::at(
            index,
            "metadata",
            "metadata must be an object",
        )),
    }

    match obj.get("embeddings") {
        None | Some(Value::Null) => {}
        Some(Value::Array(values)) => {
            for (i, value) in values.iter().enumerate() {
                if !value.is_number() {
                    let field = format!("embeddings.{}", i);
                    let message = format!("{} must be a number", field);
                    errors.push(ValidationIssue::at(index, field, message));
                }
            }
        }
        Some(_) => errors.push(ValidationIssue::at(
            index,
            "embeddings",
            "embeddings must be an array of numbers",
        )),
    }
}
