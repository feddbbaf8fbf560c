//! Error types for the form engine and schema resolver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    #[error("form stack is empty, cannot pop")]
    EmptyFormStack,

    #[error("invalid json in draft for field {field}: {details}")]
    InvalidDraftJson { field: String, details: String },

    #[error("invalid date parts for format {format}")]
    InvalidDateParts { format: String },

    /// Catch-all for adapter failures (transport, auth, cache I/O):
    /// the core crate has no business knowing about `reqwest` or
    /// filesystem error types, so adapters flatten their own errors
    /// into a message here.
    #[error("{0}")]
    Adapter(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
