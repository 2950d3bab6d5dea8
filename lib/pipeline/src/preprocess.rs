//! Record preprocessing
//!
//! Pure functions over [`InputRecord`] batches. The caller's records are
//! never touched; every call returns fresh copies.

use dataforge_core::{generate_id, normalize_vector, words, Embedding, InputRecord, Metadata};
use serde_json::Value;

/// Which preprocessing steps to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    pub normalize_text: bool,
    pub normalize_embeddings: bool,
    pub generate_missing_ids: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            normalize_text: true,
            normalize_embeddings: false,
            generate_missing_ids: true,
        }
    }
}

/// Trim, collapse whitespace runs to single spaces, lower-case
pub fn normalize_text(text: &str) -> String {
    words(text)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Drop entries whose value is null or the empty string
pub fn clean_metadata(metadata: &Metadata) -> Metadata {
    metadata
        .iter()
        .filter(|(_, value)| !is_blank(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Preprocess a single record at position `index`
pub fn preprocess_record(
    record: &InputRecord,
    index: usize,
    options: &PreprocessOptions,
) -> InputRecord {
    let mut processed = record.clone();

    if options.normalize_text && !processed.content.is_empty() {
        processed.content = normalize_text(&processed.content);
    }

    if options.normalize_embeddings {
        if let Some(embeddings) = &processed.embeddings {
            processed.embeddings = Some(Embedding::new(normalize_vector(embeddings.as_slice())));
        }
    }

    if options.generate_missing_ids && processed.explicit_id().is_none() {
        processed.id = Some(generate_id(&processed.content, Some(index)));
    }

    if let Some(metadata) = &processed.metadata {
        processed.metadata = Some(clean_metadata(metadata));
    }

    processed
}

/// Preprocess a batch, using each record's position as its id ordinal
pub fn preprocess(records: &[InputRecord], options: &PreprocessOptions) -> Vec<InputRecord> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| preprocess_record(record, index, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Hello \t\n  World  "), "hello world");
        assert_eq!(normalize_text("What is Machine Learning?"), "what is machine learning?");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("ÀÉÎ  ΣΟΦΙΑ"), "àéî σοφια");
    }

    #[test]
    fn test_normalize_text_separators() {
        assert_eq!(normalize_text("\u{feff}Hello\u{feff}World"), "hello world");
        assert_eq!(normalize_text("Line\u{85}Break"), "line\u{85}break");
        assert_eq!(normalize_text("a\u{a0}\u{2003}b\u{3000}"), "a b");
    }

    #[test]
    fn test_normalize_text_idempotent() {
        for s in ["  A  b\tC ", "x", "", "\n\n", "ΜΕΓΑΛΟ  Γράμμα", "Straße   GROSS"] {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_clean_metadata() {
        let metadata = json!({
            "topic": "AI",
            "empty": "",
            "missing": null,
            "zero": 0,
            "flag": false,
            "list": []
        });
        let cleaned = clean_metadata(metadata.as_object().unwrap());
        assert_eq!(
            Value::Object(cleaned),
            json!({"topic": "AI", "zero": 0, "flag": false, "list": []})
        );
    }

    #[test]
    fn test_generates_missing_ids_from_normalized_content() {
        let records = vec![
            InputRecord::new("Hello World"),
            InputRecord::new("kept").with_id("given"),
            InputRecord::new("Blank id").with_id(""),
        ];
        let processed = preprocess(&records, &PreprocessOptions::default());

        assert_eq!(
            processed[0].id.as_deref(),
            Some(generate_id("hello world", Some(0)).as_str())
        );
        assert_eq!(processed[1].id.as_deref(), Some("given"));
        assert_eq!(
            processed[2].id.as_deref(),
            Some(generate_id("blank id", Some(2)).as_str())
        );
    }

    #[test]
    fn test_flags_are_independent() {
        let records = vec![InputRecord::new("  Mixed Case ").with_embeddings(vec![3.0, 4.0])];

        let options = PreprocessOptions {
            normalize_text: false,
            normalize_embeddings: true,
            generate_missing_ids: false,
        };
        let processed = preprocess(&records, &options);

        assert_eq!(processed[0].content, "  Mixed Case ");
        assert_eq!(processed[0].id, None);
        let emb = processed[0].embeddings.as_ref().unwrap();
        assert!((emb.as_slice()[0] - 0.6).abs() < 1e-12);
        assert!((emb.as_slice()[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_input_untouched() {
        let metadata = json!({"a": null}).as_object().unwrap().clone();
        let records = vec![InputRecord::new("  X ").with_metadata(metadata.clone())];
        let _ = preprocess(&records, &PreprocessOptions::default());
        assert_eq!(records[0].content, "  X ");
        assert_eq!(records[0].metadata.as_ref(), Some(&metadata));
        assert_eq!(records[0].id, None);
    }
}
