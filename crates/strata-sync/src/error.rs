//! Error types for schema reconciliation.

use strata_core::CoreError;

use crate::connection::DriverError;

/// Errors raised while reconciling a table model against a live schema.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A desired schema change cannot be safely auto-applied: adding a
    /// NOT NULL or PRIMARY KEY column to an existing table, or changing
    /// a column's type. Data-bearing columns are never silently mutated.
    #[error("incompatible schema change on {table}.{column}: {reason}")]
    IncompatibleChange {
        /// Table being altered.
        table: String,
        /// Column the change concerns.
        column: String,
        /// Why the change is rejected.
        reason: String,
    },

    /// A statement failed; the offending SQL is attached for diagnostics.
    #[error("statement failed: {sql}")]
    Execution {
        /// The SQL that failed.
        sql: String,
        /// Underlying driver error.
        #[source]
        source: DriverError,
    },

    /// Catalog introspection failed.
    #[error("failed to introspect table '{table}'")]
    Introspection {
        /// Table whose metadata could not be read.
        table: String,
        /// Underlying driver error.
        #[source]
        source: DriverError,
    },

    /// Model validation or SQL generation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, SyncError>;
