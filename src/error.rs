use thiserror::Error;

/// Convenience result type for shaping operations.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Error type returned by shaping and output functions.
///
/// Every variant aborts the whole call: field resolution happens before any record is shaped,
/// so a failed call never yields partially shaped output.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// No source sequence was supplied.
    #[error("invalid argument: source sequence is missing")]
    MissingSource,

    /// A requested field does not exist on the record type (case-insensitive match).
    #[error("field '{field}' was not found on type '{type_name}'")]
    UnknownField { field: String, type_name: String },

    /// A field was requested more than once while [`crate::DuplicateFields::Reject`] is active.
    #[error("field '{field}' was requested more than once for type '{type_name}'")]
    DuplicateField { field: String, type_name: String },

    /// Underlying I/O error while writing shaped output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ShapeError {
    /// Returns `true` for errors caused by the caller-supplied field specification.
    ///
    /// API handlers typically map these to a "bad request" response naming the field.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownField { .. } | Self::DuplicateField { .. })
    }

    /// The offending field name, if this error is about a specific field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownField { field, .. } | Self::DuplicateField { field, .. } => Some(field),
            _ => None,
        }
    }
}
