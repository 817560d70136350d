//! Fault types for record construction and validation.
//!
//! Invalid field values are not errors here: they are reported through the
//! record's error map. `RecordError` covers inputs the record cannot work with.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecordError>;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to parse record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record input must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("field '{0}' is not declared in the record schema")]
    UnknownField(String),

    #[error("field '{field}' holds a malformed value: {reason}")]
    MalformedValue { field: String, reason: String },
}
