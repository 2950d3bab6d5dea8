//! Pipeline orchestration: validate, transform, then check consistency

use crate::consistency::{ConsistencyChecker, ConsistencyResult, StandardConsistencyChecker};
use crate::transform::{StandardTransformer, Transformer};
use crate::validate::{decode_records, StandardValidator, Validator};
use dataforge_core::{
    CanonicalRecord, Error, InputRecord, ProcessingConfig, Result, ValidationIssue,
    ValidationResult,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Records produced by one pipeline run, with the advisory findings
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedBatch {
    pub records: Vec<CanonicalRecord>,
    /// Validation warnings; never blocking
    pub warnings: Vec<ValidationIssue>,
    /// Present when a consistency check ran
    pub consistency: Option<ConsistencyResult>,
}

impl ProcessedBatch {
    pub fn into_records(self) -> Vec<CanonicalRecord> {
        self.records
    }

    /// True when no consistency check ran or it found nothing
    pub fn is_consistent(&self) -> bool {
        self.consistency.as_ref().map_or(true, |c| c.is_consistent)
    }
}

/// Validator → Transformer → ConsistencyChecker
///
/// Each stage is a trait object so alternative implementations can be
/// swapped in without touching the orchestration.
pub struct Pipeline {
    validator: Box<dyn Validator>,
    transformer: Box<dyn Transformer>,
    checker: Option<Box<dyn ConsistencyChecker>>,
    existing_data: Option<Vec<CanonicalRecord>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(StandardValidator::new()), Box::new(StandardTransformer::new()))
            .with_consistency_checker(Box::new(StandardConsistencyChecker::new()))
    }
}

impl Pipeline {
    /// Pipeline without a consistency checker
    pub fn new(validator: Box<dyn Validator>, transformer: Box<dyn Transformer>) -> Self {
        Self {
            validator,
            transformer,
            checker: None,
            existing_data: None,
        }
    }

    #[must_use]
    pub fn with_consistency_checker(mut self, checker: Box<dyn ConsistencyChecker>) -> Self {
        self.checker = Some(checker);
        self
    }

    /// Dataset to check against when a call does not supply one
    #[must_use]
    pub fn with_existing_data(mut self, existing: Vec<CanonicalRecord>) -> Self {
        self.existing_data = Some(existing);
        self
    }

    pub fn set_existing_data(&mut self, existing: Vec<CanonicalRecord>) {
        self.existing_data = Some(existing);
    }

    pub fn existing_data(&self) -> Option<&[CanonicalRecord]> {
        self.existing_data.as_deref()
    }

    /// Process typed records
    ///
    /// `config` is expected to have gone through [`ProcessingConfig::resolve`].
    /// `existing` overrides the pipeline's bound dataset for this call.
    pub fn process(
        &self,
        records: &[InputRecord],
        config: &ProcessingConfig,
        existing: Option<&[CanonicalRecord]>,
    ) -> Result<ProcessedBatch> {
        let warnings = if config.enable_validation {
            let result = self.validator.validate(records);
            ensure_valid(result)?
        } else {
            Vec::new()
        };

        self.transform_and_check(records, config, existing, warnings)
    }

    /// Process loosely-typed JSON items
    ///
    /// Structural problems (wrong field types, missing content) are reported
    /// together with the validator's findings, indexed by raw position.
    pub fn process_json(
        &self,
        items: &[Value],
        config: &ProcessingConfig,
        existing: Option<&[CanonicalRecord]>,
    ) -> Result<ProcessedBatch> {
        let decoded = decode_records(items);

        let warnings = if config.enable_validation {
            let mut result = decoded.result;
            let mut semantic = self.validator.validate(&decoded.records);
            semantic.remap_indices(&decoded.positions);
            result.merge(semantic);
            ensure_valid(result)?
        } else if !decoded.result.errors.is_empty() {
            return Err(Error::Decode(decoded.result.error_summary()));
        } else {
            Vec::new()
        };

        self.transform_and_check(&decoded.records, config, existing, warnings)
    }

    fn transform_and_check(
        &self,
        records: &[InputRecord],
        config: &ProcessingConfig,
        existing: Option<&[CanonicalRecord]>,
        warnings: Vec<ValidationIssue>,
    ) -> Result<ProcessedBatch> {
        let transformed = self.transformer.transform(records, config)?;

        let existing = existing.or(self.existing_data.as_deref());
        let consistency = match (&self.checker, existing) {
            (Some(checker), Some(existing)) => {
                let result = checker.check_consistency(&transformed, existing);
                if !result.is_consistent {
                    for conflict in &result.conflicts {
                        warn!(
                            field = %conflict.field,
                            conflict_type = ?conflict.conflict_type,
                            existing = %conflict.existing_value,
                            new = %conflict.new_value,
                            "consistency conflict"
                        );
                    }
                }
                Some(result)
            }
            _ => None,
        };

        debug!(records = transformed.len(), "pipeline run complete");

        Ok(ProcessedBatch {
            records: transformed,
            warnings,
            consistency,
        })
    }
}

/// Fail on any error; otherwise log and hand back the warnings
fn ensure_valid(result: ValidationResult) -> Result<Vec<ValidationIssue>> {
    if !result.is_valid {
        warn!(errors = result.errors.len(), "validation failed");
        return Err(Error::Validation(result));
    }
    for warning in &result.warnings {
        warn!(index = warning.index, field = %warning.field, "{}", warning.message);
    }
    Ok(result.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consistency::ConflictType;
    use dataforge_core::{Embedding, EMBEDDING_DIM};
    use serde_json::json;

    struct RejectAll;

    impl Validator for RejectAll {
        fn validate(&self, _records: &[InputRecord]) -> ValidationResult {
            ValidationResult::new(
                vec![ValidationIssue::at(0, "content", "rejected")],
                Vec::new(),
            )
        }
    }

    struct NoIds;

    impl Transformer for NoIds {
        fn transform(
            &self,
            _records: &[InputRecord],
            _config: &ProcessingConfig,
        ) -> Result<Vec<CanonicalRecord>> {
            Err(Error::Transform("id is required for transformation".to_string()))
        }
    }

    #[test]
    fn test_process_default_config() {
        let pipeline = Pipeline::default();
        let batch = pipeline
            .process(
                &[InputRecord::new("What is machine learning?")],
                &ProcessingConfig::default(),
                None,
            )
            .unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].embeddings.dim(), EMBEDDING_DIM);
        assert!(batch.consistency.is_none());
        assert!(batch.is_consistent());
    }

    #[test]
    fn test_validation_failure_aggregates_messages() {
        let pipeline = Pipeline::default();
        let records = vec![
            InputRecord::new("a").with_id("x"),
            InputRecord::new("b").with_id("x"),
            InputRecord::new("c").with_embeddings(vec![f64::NAN]),
        ];
        let err = pipeline
            .process(&records, &ProcessingConfig::default(), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: embeddings contain non-finite values, duplicate id found: x"
        );
        assert_eq!(err.validation().unwrap().errors.len(), 2);
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let pipeline = Pipeline::new(Box::new(RejectAll), Box::new(StandardTransformer::new()));
        let config = ProcessingConfig {
            enable_validation: false,
            ..ProcessingConfig::default()
        };
        assert!(pipeline.process(&[InputRecord::new("x")], &config, None).is_ok());
        assert!(pipeline
            .process(&[InputRecord::new("x")], &ProcessingConfig::default(), None)
            .is_err());
    }

    #[test]
    fn test_transform_errors_are_distinct() {
        let pipeline = Pipeline::new(Box::new(StandardValidator::new()), Box::new(NoIds));
        let err = pipeline
            .process(&[InputRecord::new("x")], &ProcessingConfig::default(), None)
            .unwrap_err();
        assert!(matches!(err, Error::Transform(_)));
    }

    #[test]
    fn test_warnings_returned_with_records() {
        let pipeline = Pipeline::default();
        let batch = pipeline
            .process(&[InputRecord::new("   ")], &ProcessingConfig::default(), None)
            .unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.warnings.len(), 1);
        assert_eq!(batch.warnings[0].field, "content");
    }

    #[test]
    fn test_consistency_is_advisory() {
        let existing = vec![CanonicalRecord {
            id: "x".to_string(),
            content: "foo".to_string(),
            metadata: Default::default(),
            embeddings: Embedding::zeros(3),
            processed_at: chrono::Utc::now(),
        }];
        let pipeline = Pipeline::default().with_existing_data(existing);

        let batch = pipeline
            .process(
                &[InputRecord::new("bar").with_id("x")],
                &ProcessingConfig::default(),
                None,
            )
            .unwrap();
        assert_eq!(batch.records.len(), 1);
        assert!(!batch.is_consistent());

        let consistency = batch.consistency.unwrap();
        assert_eq!(consistency.conflicts_of(ConflictType::DuplicateId).count(), 1);
        assert!(consistency
            .conflicts
            .iter()
            .any(|c| c.field == "embeddings_dimension"));
    }

    #[test]
    fn test_bound_existing_data_replaced() {
        let mut pipeline = Pipeline::default();
        assert!(pipeline.existing_data().is_none());

        let existing = pipeline
            .process(&[InputRecord::new("foo").with_id("x")], &ProcessingConfig::default(), None)
            .unwrap()
            .into_records();
        pipeline.set_existing_data(existing);
        assert_eq!(pipeline.existing_data().map(|d| d.len()), Some(1));

        let batch = pipeline
            .process(&[InputRecord::new("bar").with_id("x")], &ProcessingConfig::default(), None)
            .unwrap();
        let consistency = batch.consistency.unwrap();
        assert_eq!(consistency.conflicts_of(ConflictType::DuplicateId).count(), 1);
    }

    #[test]
    fn test_per_call_existing_overrides_bound() {
        let pipeline = Pipeline::default().with_existing_data(Vec::new());
        let batch = pipeline
            .process(&[InputRecord::new("x")], &ProcessingConfig::default(), Some(&[][..]))
            .unwrap();
        assert!(batch.consistency.unwrap().is_consistent);
    }

    #[test]
    fn test_no_checker_means_no_consistency() {
        let pipeline = Pipeline::new(
            Box::new(StandardValidator::new()),
            Box::new(StandardTransformer::new()),
        );
        let batch = pipeline
            .process(&[InputRecord::new("x")], &ProcessingConfig::default(), Some(&[][..]))
            .unwrap();
        assert!(batch.consistency.is_none());
    }

    #[test]
    fn test_process_json_reports_raw_positions() {
        let pipeline = Pipeline::default();
        let items = vec![
            json!({"content": 5}),
            json!({"content": "ok", "embeddings": [1.0, 2.0]}),
            json!({"content": "   "}),
        ];
        let err = pipeline
            .process_json(&items, &ProcessingConfig::default(), None)
            .unwrap_err();
        let result = err.validation().unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].index, 0);
        let warning_indices: Vec<i64> = result.warnings.iter().map(|w| w.index).collect();
        assert_eq!(warning_indices, vec![1, 2]);
    }

    #[test]
    fn test_process_json_without_validation_still_decodes() {
        let pipeline = Pipeline::default();
        let config = ProcessingConfig {
            enable_validation: false,
            ..ProcessingConfig::default()
        };
        let err = pipeline
            .process_json(&[json!({"content": 5})], &config, None)
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));

        let batch = pipeline
            .process_json(&[json!({"content": "Fine"})], &config, None)
            .unwrap();
        assert_eq!(batch.records[0].content, "fine");
    }
}
