//! Create processor.

use tracing::{debug, info};

use strata_core::builder::{split_statements, CreateTableBuilder};
use strata_core::dialect::DialectRegistry;
use strata_core::model::TableModel;

use crate::connection::SchemaConnection;
use crate::error::{Result, SyncError};
use crate::options::SyncOptions;

/// Applies a table model by creating the table on the live connection.
pub struct CreateProcessor<'a> {
    registry: &'a DialectRegistry,
    options: SyncOptions,
}

impl<'a> CreateProcessor<'a> {
    /// Creates a processor resolving dialects from the given registry.
    #[must_use]
    pub fn new(registry: &'a DialectRegistry) -> Self {
        Self {
            registry,
            options: SyncOptions::default(),
        }
    }

    /// Sets the reconciliation options.
    #[must_use]
    pub fn options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Creates the modeled table.
    ///
    /// `defer_foreign_keys` suppresses foreign-key clauses for
    /// two-phase creation, where the caller adds them after all
    /// referenced tables exist. Statements are split on the builder
    /// delimiter and executed in sequence; the first failure aborts and
    /// carries the offending SQL.
    pub fn create_table(
        &self,
        conn: &mut dyn SchemaConnection,
        model: &TableModel,
        defer_foreign_keys: bool,
    ) -> Result<()> {
        model.validate(self.options.case_sensitive)?;
        let dialect = self.registry.by_product_name(conn.product_name())?;

        info!(table = %model.name, dialect = dialect.product_name(), "creating table");

        let sql = CreateTableBuilder::from_model(dialect.as_ref(), model)
            .case_sensitive(self.options.case_sensitive)
            .skip_foreign_keys(defer_foreign_keys)
            .build()?;

        for statement in split_statements(&sql) {
            debug!(sql = statement, "executing");
            conn.execute(statement).map_err(|source| SyncError::Execution {
                sql: statement.to_string(),
                source,
            })?;
        }
        Ok(())
    }
}
