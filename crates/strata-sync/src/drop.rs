//! Drop processor.
//!
//! Dropping is best-effort cleanup: tables holding data are never
//! dropped, and failures are logged as warnings rather than propagated.

use tracing::{debug, info, warn};

use strata_core::builder::{split_statements, DropTableBuilder};
use strata_core::dialect::DialectRegistry;
use strata_core::model::TableModel;

use crate::connection::SchemaConnection;
use crate::error::Result;
use crate::options::SyncOptions;

/// What a drop pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Foreign keys and the table were dropped.
    Dropped,
    /// The table still holds rows and was left alone.
    SkippedNotEmpty,
    /// A statement or the row count failed; logged, not propagated.
    Failed,
}

/// Drops a modeled table, guarded by its row count.
pub struct DropProcessor<'a> {
    registry: &'a DialectRegistry,
    options: SyncOptions,
}

impl<'a> DropProcessor<'a> {
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

    /// Drops the modeled table if it is empty.
    ///
    /// Declared foreign keys are dropped individually first to satisfy
    /// referential-integrity ordering. Execution failures produce
    /// [`DropOutcome::Failed`] with a warning log; only dialect
    /// resolution and model errors propagate.
    pub fn drop_table(
        &self,
        conn: &mut dyn SchemaConnection,
        model: &TableModel,
    ) -> Result<DropOutcome> {
        let dialect = self.registry.by_product_name(conn.product_name())?;

        let rows = match conn.count_rows(&model.name) {
            Ok(rows) => rows,
            Err(error) => {
                warn!(table = %model.name, error = %error, "row count failed, skipping drop");
                return Ok(DropOutcome::Failed);
            }
        };
        if rows > 0 {
            warn!(table = %model.name, rows, "table not empty, skipping drop");
            return Ok(DropOutcome::SkippedNotEmpty);
        }

        info!(table = %model.name, "dropping table");
        let sql = DropTableBuilder::from_model(dialect.as_ref(), model)
            .case_sensitive(self.options.case_sensitive)
            .build();
        for statement in split_statements(&sql) {
            debug!(sql = statement, "executing");
            if let Err(error) = conn.execute(statement) {
                warn!(sql = statement, error = %error, "drop statement failed");
                return Ok(DropOutcome::Failed);
            }
        }
        Ok(DropOutcome::Dropped)
    }
}
