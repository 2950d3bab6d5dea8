//! Dataset file I/O
//!
//! Input files hold a JSON array of loosely-typed records; dataset files
//! hold a JSON array of canonical records as written by the JSON formatter.

use dataforge_core::{CanonicalRecord, Error, ProcessingConfig, Result};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Read a JSON array of input items
///
/// Items are returned undecoded so the pipeline can report structural
/// problems per position.
pub fn read_input_file(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Array(items) => Ok(items),
        _ => Err(Error::Decode(format!(
            "{} must contain a JSON array",
            path.display()
        ))),
    }
}

/// Read a previously produced dataset
pub fn read_dataset_file(path: impl AsRef<Path>) -> Result<Vec<CanonicalRecord>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Read a processing config; absent fields take their defaults
pub fn read_config_file(path: impl AsRef<Path>) -> Result<ProcessingConfig> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| Error::InvalidConfig(e.to_string()))
}

/// Write to `path`, or to stdout with a trailing newline when there is none
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)?,
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
    }
    Ok(())
}
