//! Error types for model validation, type resolution, and dialect lookup.

use crate::types::DataType;

/// Errors raised while building SQL or resolving dialect metadata.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The abstract type has no native mapping in the given dialect.
    #[error("no native type for {data_type} in dialect '{dialect}'")]
    TypeResolution {
        /// The abstract column type that failed to resolve.
        data_type: DataType,
        /// Product name of the dialect that was asked.
        dialect: String,
    },

    /// A table model is structurally invalid (zero columns, duplicate
    /// column names, mismatched foreign key arity, ...).
    #[error("invalid table model: {0}")]
    InvalidModel(String),

    /// No dialect is registered for the given product name or system.
    #[error("no dialect registered for '{0}'")]
    UnknownDialect(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
