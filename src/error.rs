//! Error types for configuration validation and report output

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single configuration field that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field (snake_case, as in the JSON config)
    pub field: &'static str,
    /// Why the value was rejected
    pub reason: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Invalid configuration: {}", join_violations(.violations))]
    InvalidConfiguration { violations: Vec<FieldViolation> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectionError {
    /// Names of the offending fields, empty for non-validation errors
    pub fn offending_fields(&self) -> Vec<&'static str> {
        match self {
            ProjectionError::InvalidConfiguration { violations } => {
                violations.iter().map(|v| v.field).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type CashflowResult<T> = Result<T, ProjectionError>;
