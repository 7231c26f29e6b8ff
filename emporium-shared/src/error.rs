use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification shared by every error type in the workspace.
///
/// Callers that present errors to an end user match on the kind rather than
/// on the concrete error enum of each crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed input: negative price or quantity, empty name, and the like
    Validation,
    /// Requested quantity exceeds available stock
    InsufficientStock,
    /// Referenced id does not exist
    NotFound,
    /// Mutation attempted on a completed order
    OrderClosed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation error",
            ErrorKind::InsufficientStock => "insufficient stock",
            ErrorKind::NotFound => "not found",
            ErrorKind::OrderClosed => "order closed",
        };
        f.write_str(label)
    }
}
