// Integration tests for DataForge
use dataforge::prelude::*;
use dataforge::{
    format_data, read_dataset_file, read_input_file, write_output, ConflictType,
    StandardTransformer, StandardValidator,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn metadata(value: serde_json::Value) -> Metadata {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("metadata must be an object"),
    }
}

#[test]
fn test_single_record_default_config() {
    let forge = DataForge::default();
    let input = [InputRecord::new("What is machine learning?")
        .with_metadata(metadata(json!({"topic": "AI"})))];

    let records = forge.process_data(&input, None, None).unwrap().into_records();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.content, "what is machine learning?");
    assert_eq!(record.embeddings.dim(), 384);
    assert!(!record.id.is_empty());
    assert_eq!(record.metadata["topic"], json!("AI"));
}

#[test]
fn test_normalize_embeddings_scales_to_unit_length() {
    let forge = DataForge::default();
    let config = ProcessingConfig::default().with_normalize_embeddings(true);
    let input = [InputRecord::new("a").with_embeddings(vec![1.0, 2.0, 2.0])];

    let records = forge.process_data(&input, Some(config), None).unwrap().into_records();
    let emb = records[0].embeddings.as_slice();

    assert_eq!(emb.len(), 384);
    assert!((emb[0] - 1.0 / 3.0).abs() < 1e-12);
    assert!((emb[1] - 2.0 / 3.0).abs() < 1e-12);
    assert!((emb[2] - 2.0 / 3.0).abs() < 1e-12);
    assert!(emb[3..].iter().all(|&x| x == 0.0));
}

#[test]
fn test_supplied_embeddings_kept_without_normalization() {
    let forge = DataForge::default();
    let input = [InputRecord::new("a").with_embeddings(vec![1.0, 2.0, 2.0])];

    let records = forge.process_data(&input, None, None).unwrap().into_records();
    assert_eq!(&records[0].embeddings.as_slice()[..3], &[1.0, 2.0, 2.0]);
}

#[test]
fn test_existing_dataset_conflicts() {
    let existing = vec![CanonicalRecord {
        id: "x".to_string(),
        content: "foo".to_string(),
        metadata: Metadata::new(),
        embeddings: Embedding::new(vec![0.0, 0.0, 0.0]),
        processed_at: chrono::Utc::now(),
    }];
    let forge = DataForge::default();
    let input = [InputRecord::new("bar")
        .with_id("x")
        .with_embeddings(Embedding::zeros(384))];

    let batch = forge.process_data(&input, None, Some(existing.as_slice())).unwrap();
    assert_eq!(batch.records.len(), 1);

    let consistency = batch.consistency.unwrap();
    assert!(!consistency.is_consistent);
    assert_eq!(consistency.conflicts_of(ConflictType::DuplicateId).count(), 1);
    let dimension = consistency
        .conflicts
        .iter()
        .find(|c| c.field == "embeddings_dimension")
        .unwrap();
    assert_eq!(dimension.existing_value, json!(3));
    assert_eq!(dimension.new_value, json!(384));
}

#[test]
fn test_empty_outputs() {
    let json_config = ProcessingConfig::default();
    let csv_config = ProcessingConfig::default().with_output_format(OutputFormat::Csv);
    assert_eq!(format_data(&[], &json_config).unwrap(), "[]");
    assert_eq!(format_data(&[], &csv_config).unwrap(), "");
}

#[test]
fn test_generated_ids_are_deterministic() {
    let forge = DataForge::default();
    let input = [InputRecord::new("Same content"), InputRecord::new("Same content")];

    let first = forge.process_data(&input, None, None).unwrap().into_records();
    let second = forge.process_data(&input, None, None).unwrap().into_records();

    assert_eq!(first[0].id, second[0].id);
    assert_ne!(first[0].id, first[1].id);
    assert!(first[0].id.ends_with("-0"));
    assert!(first[1].id.ends_with("-1"));
}

#[test]
fn test_validation_failure_is_fatal() {
    let forge = DataForge::default();
    let input = [
        InputRecord::new("one").with_id("dup"),
        InputRecord::new("two").with_id("dup"),
    ];
    let err = forge.process_data(&input, None, None).unwrap_err();
    let result = err.validation().unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.errors[0].message, "duplicate id found: dup");
}

#[test]
fn test_custom_pipeline_without_checker() {
    let pipeline = Pipeline::new(
        Box::new(StandardValidator::new()),
        Box::new(StandardTransformer::new()),
    );
    let forge = DataForge::new(pipeline, Box::new(dataforge::MockDataGenerator::new()));

    let batch = forge
        .process_data(&[InputRecord::new("x")], None, Some(&[][..]))
        .unwrap();
    assert!(batch.consistency.is_none());
}

#[test]
fn test_create_then_add_through_files() {
    let dir = TempDir::new().unwrap();
    let dataset_path = dir.path().join("dataset.json");
    let input_path = dir.path().join("input.json");

    let forge = DataForge::default();
    let dataset = forge
        .create_new_dataset("Generate QA data about machine learning", 5, None)
        .unwrap();
    write_output(Some(dataset_path.as_path()), &dataset).unwrap();

    let existing = read_dataset_file(&dataset_path).unwrap();
    assert_eq!(existing.len(), 5);
    assert!(existing.iter().all(|r| r.id.starts_with("mock-")));

    fs::write(
        &input_path,
        json!([
            {"content": "How do transformers work?", "metadata": {"topic": "AI"}},
            {"id": existing[0].id, "content": "A replacement"}
        ])
        .to_string(),
    )
    .unwrap();
    let items = read_input_file(&input_path).unwrap();

    let output = forge
        .process_json_formatted(&items, None, Some(existing.as_slice()))
        .unwrap();
    assert_eq!(output.batch.records.len(), 2);

    let consistency = output.batch.consistency.unwrap();
    assert_eq!(consistency.conflicts_of(ConflictType::DuplicateId).count(), 1);
    assert!(consistency
        .conflicts_of(ConflictType::SchemaMismatch)
        .any(|c| c.field == "metadata_schema"));

    let parsed: Vec<CanonicalRecord> = serde_json::from_str(&output.formatted).unwrap();
    assert_eq!(parsed.len(), 2);
}

#[test]
fn test_csv_round_trip_shape() {
    let forge = DataForge::default();
    let config = ProcessingConfig::default().with_output_format(OutputFormat::Csv);
    let input = [InputRecord::new("Hello, \"world\"")
        .with_metadata(metadata(json!({"a": 1})))];

    let csv = forge.process_and_format(&input, Some(config), None).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("id,content,embeddings,processed_at,metadata"));
    let row = lines.next().unwrap();
    assert!(row.contains(r#""hello, ""world""""#));
    assert!(row.ends_with(r#""{""a"":1}""#));
    assert!(lines.next().is_none());
}
