//! Edit errors.

use thiserror::Error;

/// Errors that can occur when applying an edit to a form state.
///
/// Validation itself never fails; only addressing a field the schema does
/// not declare does.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditError {
    #[error("Field '{field}' is not declared by the schema")]
    UnknownField { field: String },
}
