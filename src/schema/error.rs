//! Schema compilation errors.

use thiserror::Error;

/// A single structural defect found while compiling a schema.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaIssue {
    #[error("Schema could not be parsed: {reason}")]
    Malformed { reason: String },

    #[error("Schema declares no fields. Add at least one field")]
    NoFields,

    #[error("Field name must not be empty")]
    EmptyFieldName,

    #[error("Field '{field}' is declared more than once")]
    DuplicateField { field: String },

    #[error("Field '{field}' uses unknown validator '{name}'")]
    UnknownValidator { field: String, name: String },

    #[error("Unknown form rule '{name}'")]
    UnknownFormRule { name: String },

    #[error("Field '{field}' has invalid length bounds (min {min} > max {max})")]
    InvalidLength { field: String, min: usize, max: usize },

    #[error("Field '{field}' has invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("Form rule references undeclared field '{field}'")]
    UnknownFieldReference { field: String },
}

/// A malformed schema, reported once with every issue found.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid form schema: {}", join_issues(.issues))]
pub struct SchemaError {
    issues: Vec<SchemaIssue>,
}

impl SchemaError {
    pub fn new(issues: Vec<SchemaIssue>) -> Self {
        Self { issues }
    }

    /// All issues, in the order they were found.
    pub fn issues(&self) -> &[SchemaIssue] {
        &self.issues
    }
}

impl From<SchemaIssue> for SchemaError {
    fn from(issue: SchemaIssue) -> Self {
        Self::new(vec![issue])
    }
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
