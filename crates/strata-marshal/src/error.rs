//! Error types for value marshaling.

use strata_core::types::DataType;

/// Errors raised while moving values between records and rows.
///
/// Every variant propagates: a value is never silently defaulted. The
/// one corrective behavior, character truncation, is applied in place
/// and only warned about.
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
    /// The value cannot be bound or read for the column's declared
    /// abstract type.
    #[error("cannot marshal {value} for column '{column}' of type {data_type}")]
    UnsupportedType {
        /// Column being bound or read.
        column: String,
        /// The column's abstract type.
        data_type: DataType,
        /// Kind of the offending value.
        value: String,
    },

    /// A narrowing, enum, or char coercion failed.
    #[error("invalid coercion for column '{column}': {reason}")]
    InvalidCoercion {
        /// Column being coerced.
        column: String,
        /// What went wrong.
        reason: String,
    },

    /// The mapping declares no binding for a modeled column.
    #[error("no field mapping for column '{0}'")]
    MissingField(String),

    /// The table model has no primary-key column.
    #[error("table '{0}' has no primary key column")]
    MissingPrimaryKey(String),
}

/// Result type for marshaling operations.
pub type Result<T> = std::result::Result<T, MarshalError>;
