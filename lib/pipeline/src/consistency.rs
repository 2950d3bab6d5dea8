//! Cross-dataset consistency checks
//!
//! Compares a freshly produced batch against a previously accumulated
//! dataset. Findings are returned as data and never abort processing.

use ahash::{AHashMap, AHashSet};
use dataforge_core::{CanonicalRecord, Metadata};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Compares new records against an existing dataset
pub trait ConsistencyChecker: Send + Sync {
    fn check_consistency(
        &self,
        new_records: &[CanonicalRecord],
        existing_records: &[CanonicalRecord],
    ) -> ConsistencyResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    SchemaMismatch,
    DuplicateId,
    TypeConflict,
}

impl ConflictType {
    /// Fixed advice attached to a result whenever this conflict type occurs
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            ConflictType::DuplicateId => &[
                "Consider updating existing records instead of creating duplicates",
                "Review ID generation strategy to avoid conflicts",
            ],
            ConflictType::SchemaMismatch => &[
                "Standardize metadata schema across all records",
                "Consider migration strategy for schema changes",
            ],
            ConflictType::TypeConflict => &[
                "Ensure consistent data types for metadata fields",
                "Implement type validation before data ingestion",
            ],
        }
    }
}

/// One detected mismatch between the new batch and the existing dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyConflict {
    pub field: String,
    pub existing_value: Value,
    pub new_value: Value,
    pub conflict_type: ConflictType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyResult {
    pub is_consistent: bool,
    pub conflicts: Vec<ConsistencyConflict>,
    pub recommendations: Vec<String>,
}

impl ConsistencyResult {
    pub fn from_conflicts(conflicts: Vec<ConsistencyConflict>) -> Self {
        let recommendations = recommendations_for(&conflicts);
        Self {
            is_consistent: conflicts.is_empty(),
            conflicts,
            recommendations,
        }
    }

    /// Conflicts of one type
    pub fn conflicts_of(&self, kind: ConflictType) -> impl Iterator<Item = &ConsistencyConflict> {
        self.conflicts.iter().filter(move |c| c.conflict_type == kind)
    }
}

/// Runtime type of a metadata value
///
/// Null, arrays and maps all count as `object`, so swapping one for another
/// is not a type conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Number,
    String,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Null | Value::Array(_) | Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default checker: duplicate ids, metadata schema, metadata types, embedding dimension
#[derive(Debug, Clone, Default)]
pub struct StandardConsistencyChecker;

impl StandardConsistencyChecker {
    pub fn new() -> Self {
        Self
    }

    /// Same id as an existing record but different content
    fn check_duplicate_ids(
        &self,
        new_records: &[CanonicalRecord],
        existing: &[CanonicalRecord],
    ) -> Vec<ConsistencyConflict> {
        // First occurrence wins
        let mut by_id: AHashMap<&str, &CanonicalRecord> = AHashMap::new();
        for record in existing {
            by_id.entry(record.id.as_str()).or_insert(record);
        }

        new_records
            .iter()
            .filter_map(|new| {
                let old = by_id.get(new.id.as_str())?;
                (old.content != new.content).then(|| ConsistencyConflict {
                    field: "id".to_string(),
                    existing_value: Value::String(old.content.clone()),
                    new_value: Value::String(new.content.clone()),
                    conflict_type: ConflictType::DuplicateId,
                })
            })
            .collect()
    }

    /// Metadata key set differs from the union of existing keys
    fn check_schema(
        &self,
        new_records: &[CanonicalRecord],
        existing: &[CanonicalRecord],
    ) -> Vec<ConsistencyConflict> {
        if existing.is_empty() {
            return Vec::new();
        }

        let existing_keys: BTreeSet<&str> = existing
            .iter()
            .flat_map(|r| r.metadata.keys().map(String::as_str))
            .collect();

        new_records
            .iter()
            .filter_map(|new| {
                let new_keys: BTreeSet<&str> = new.metadata.keys().map(String::as_str).collect();
                (new_keys != existing_keys).then(|| ConsistencyConflict {
                    field: "metadata_schema".to_string(),
                    existing_value: json!(existing_keys),
                    new_value: json!(new_keys),
                    conflict_type: ConflictType::SchemaMismatch,
                })
            })
            .collect()
    }

    /// Metadata value types differ from those of the first existing record
    fn check_types(
        &self,
        new_records: &[CanonicalRecord],
        existing: &[CanonicalRecord],
    ) -> Vec<ConsistencyConflict> {
        let Some(reference) = existing.first() else {
            return Vec::new();
        };
        let reference_kinds = metadata_kinds(&reference.metadata);

        let mut conflicts = Vec::new();
        for new in new_records {
            for (key, value) in &new.metadata {
                let new_kind = ValueKind::of(value);
                match reference_kinds.get(key.as_str()) {
                    Some(&old_kind) if old_kind != new_kind => {
                        conflicts.push(ConsistencyConflict {
                            field: format!("metadata.{}", key),
                            existing_value: Value::String(old_kind.to_string()),
                            new_value: Value::String(new_kind.to_string()),
                            conflict_type: ConflictType::TypeConflict,
                        });
                    }
                    _ => {}
                }
            }
        }
        conflicts
    }

    /// Embedding length differs from that of the first existing record
    fn check_dimensions(
        &self,
        new_records: &[CanonicalRecord],
        existing: &[CanonicalRecord],
    ) -> Vec<ConsistencyConflict> {
        let Some(reference) = existing.first() else {
            return Vec::new();
        };
        let expected = reference.embeddings.dim();

        new_records
            .iter()
            .filter(|new| new.embeddings.dim() != expected)
            .map(|new| ConsistencyConflict {
                field: "embeddings_dimension".to_string(),
                existing_value: json!(expected),
                new_value: json!(new.embeddings.dim()),
                conflict_type: ConflictType::SchemaMismatch,
            })
            .collect()
    }
}

impl ConsistencyChecker for StandardConsistencyChecker {
    fn check_consistency(
        &self,
        new_records: &[CanonicalRecord],
        existing_records: &[CanonicalRecord],
    ) -> ConsistencyResult {
        let mut conflicts = self.check_duplicate_ids(new_records, existing_records);
        conflicts.extend(self.check_schema(new_records, existing_records));
        conflicts.extend(self.check_types(new_records, existing_records));
        conflicts.extend(self.check_dimensions(new_records, existing_records));

        debug!(
            new = new_records.len(),
            existing = existing_records.len(),
            conflicts = conflicts.len(),
            "checked consistency"
        );

        ConsistencyResult::from_conflicts(conflicts)
    }
}

fn metadata_kinds(metadata: &Metadata) -> AHashMap<&str, ValueKind> {
    metadata
        .iter()
        .map(|(key, value)| (key.as_str(), ValueKind::of(value)))
        .collect()
}

/// Canned advice, one set per conflict type present, in a fixed order
fn recommendations_for(conflicts: &[ConsistencyConflict]) -> Vec<String> {
    let present: AHashSet<ConflictType> = conflicts.iter().map(|c| c.conflict_type).collect();

    [
        ConflictType::DuplicateId,
        ConflictType::SchemaMismatch,
        ConflictType::TypeConflict,
    ]
    .into_iter()
    .filter(|kind| present.contains(kind))
    .flat_map(|kind| kind.recommendations().iter().map(|s| s.to_string()))
    .collect()
}
