//! Record serialization

use dataforge_core::{timestamp, CanonicalRecord, Error, OutputFormat, ProcessingConfig, Result};
use tracing::warn;

/// Column order of CSV output
pub const CSV_HEADERS: [&str; 5] = ["id", "content", "embeddings", "processed_at", "metadata"];

/// Serialize records in the format named by `config.output_format`
///
/// `parquet` is recognized but unimplemented and fails. Formats that are not
/// recognized at all fall back to JSON.
pub fn format_data(records: &[CanonicalRecord], config: &ProcessingConfig) -> Result<String> {
    match &config.output_format {
        OutputFormat::Json => format_json(records),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Parquet => Err(Error::UnsupportedFormat("Parquet".to_string())),
        OutputFormat::Other(name) => {
            warn!(format = %name, "unrecognized output format, falling back to json");
            format_json(records)
        }
    }
}

/// Pretty-printed JSON array with two-space indentation
pub fn format_json(records: &[CanonicalRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Header row plus one row per record; empty input gives an empty string
pub fn format_csv(records: &[CanonicalRecord]) -> Result<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(CSV_HEADERS.join(","));

    for record in records {
        let fields = [
            escape_csv_field(&record.id),
            escape_csv_field(&record.content),
            escape_csv_field(&serde_json::to_string(&record.embeddings)?),
            escape_csv_field(&timestamp::format(&record.processed_at)),
            escape_csv_field(&serde_json::to_string(&record.metadata)?),
        ];
        rows.push(fields.join(","));
    }

    Ok(rows.join("\n"))
}

/// Quote a field containing a comma, double quote or newline, doubling inner quotes
pub fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
