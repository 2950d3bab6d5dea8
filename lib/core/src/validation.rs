use serde::{Deserialize, Serialize};

/// Index used for findings that span several records rather than one
pub const BATCH_INDEX: i64 = -1;

/// A single validation finding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Position of the offending record, or [`BATCH_INDEX`]
    pub index: i64,
    /// Field path, e.g. `content` or `embeddings.3`
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(index: i64, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn at(index: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(index as i64, field, message)
    }
}

/// Outcome of validating a batch
///
/// Errors block processing; warnings are advisory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.is_valid = self.errors.is_empty();
    }

    /// Rewrite per-record indices through `positions`
    ///
    /// Used when a result was computed over a subset of a larger batch:
    /// index `i` becomes `positions[i]`. Batch-level findings are kept as-is.
    pub fn remap_indices(&mut self, positions: &[usize]) {
        for issue in self.errors.iter_mut().chain(self.warnings.iter_mut()) {
            if issue.index >= 0 {
                if let Some(&pos) = positions.get(issue.index as usize) {
                    issue.index = pos as i64;
                }
            }
        }
    }

    /// All error messages joined by `", "`
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
