//! The connection boundary.
//!
//! The engine owns no connectivity. Callers hand each reconciliation
//! pass a handle implementing [`SchemaConnection`]; acquisition and
//! release are the caller's responsibility, and the engine never
//! retains the handle beyond the call.

/// Driver-level error type crossing the connection boundary.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One column of a live table, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveColumn {
    /// Column name as stored in the catalog.
    pub name: String,
    /// Native type name (without length/scale arguments, or with them;
    /// the diff compares the base name only).
    pub native_type: String,
}

impl LiveColumn {
    /// Creates a live column entry.
    #[must_use]
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
        }
    }
}

/// Connection-like handle to a relational backend.
///
/// Catalog reads are performed fresh on every reconciliation pass; the
/// database is the source of truth and nothing is cached across calls.
pub trait SchemaConnection {
    /// Database product name as reported by the driver, used to resolve
    /// the dialect.
    fn product_name(&self) -> &str;

    /// Executes one SQL statement, returning the affected row count.
    fn execute(&mut self, sql: &str) -> std::result::Result<u64, DriverError>;

    /// Counts the rows currently in a table.
    fn count_rows(&mut self, table: &str) -> std::result::Result<i64, DriverError>;

    /// Lists the live columns of a table from catalog metadata.
    fn table_columns(&mut self, table: &str) -> std::result::Result<Vec<LiveColumn>, DriverError>;
}
