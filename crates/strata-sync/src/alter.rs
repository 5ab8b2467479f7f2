//! Alter processor: the schema diff.
//!
//! Compares a desired table model against the live catalog and applies
//! the minimal safe set of column additions and drops. Whole columns
//! only: the diff never renames and never migrates data. Anything that
//! would touch a data-bearing column is rejected up front, before a
//! single statement executes.

use std::collections::HashMap;

use tracing::{debug, info};

use strata_core::builder::{split_statements, AlterTableBuilder};
use strata_core::dialect::DialectRegistry;
use strata_core::model::{ColumnModel, TableModel};

use crate::connection::SchemaConnection;
use crate::error::{Result, SyncError};
use crate::options::{normalize, SyncOptions};

/// What an alter pass did, per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlterOutcome {
    /// Columns added to the live table.
    pub added: Vec<String>,
    /// Live columns dropped because the model no longer declares them.
    pub dropped: Vec<String>,
}

impl AlterOutcome {
    /// Returns `true` if the pass changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.dropped.is_empty()
    }
}

/// Reconciles a table model against the live table's column set.
pub struct AlterProcessor<'a> {
    registry: &'a DialectRegistry,
    options: SyncOptions,
}

impl<'a> AlterProcessor<'a> {
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

    /// Diffs the model against the live catalog and applies the
    /// resulting ADD/DROP statements one at a time.
    ///
    /// Incompatible changes (new NOT NULL column, new PRIMARY KEY
    /// column, column type change) fail the whole pass before any
    /// statement executes.
    pub fn alter_table(
        &self,
        conn: &mut dyn SchemaConnection,
        model: &TableModel,
    ) -> Result<AlterOutcome> {
        let case_sensitive = self.options.case_sensitive;
        model.validate(case_sensitive)?;
        let dialect = self.registry.by_product_name(conn.product_name())?;

        // Fresh catalog snapshot; the database is the source of truth.
        let live = conn
            .table_columns(&model.name)
            .map_err(|source| SyncError::Introspection {
                table: model.name.clone(),
                source,
            })?;
        let live_map: HashMap<String, (String, String)> = live
            .into_iter()
            .map(|c| {
                let key = normalize(&c.name, case_sensitive);
                (key, (c.name, c.native_type))
            })
            .collect();

        // Planning phase: collect adds/drops and reject incompatible
        // changes before executing anything.
        let mut adds: Vec<&ColumnModel> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for column in &model.columns {
            let key = normalize(&column.name, case_sensitive);
            seen.insert(key.clone());
            match live_map.get(&key) {
                None => {
                    if !column.nullable {
                        return Err(SyncError::IncompatibleChange {
                            table: model.name.clone(),
                            column: column.name.clone(),
                            reason: "cannot add a NOT NULL column to an existing table".into(),
                        });
                    }
                    if column.primary_key {
                        return Err(SyncError::IncompatibleChange {
                            table: model.name.clone(),
                            column: column.name.clone(),
                            reason: "cannot add a PRIMARY KEY column to an existing table".into(),
                        });
                    }
                    adds.push(column);
                }
                Some((_, live_type)) => {
                    let desired = dialect.native_type(column.data_type)?.name;
                    let live_base = live_type.split('(').next().unwrap_or(live_type).trim();
                    if !live_base.eq_ignore_ascii_case(desired) {
                        return Err(SyncError::IncompatibleChange {
                            table: model.name.clone(),
                            column: column.name.clone(),
                            reason: format!(
                                "column type change from {live_base} to {desired} is not supported"
                            ),
                        });
                    }
                }
            }
        }
        let mut drops: Vec<&String> = live_map
            .iter()
            .filter(|(key, _)| !seen.contains(*key))
            .map(|(_, (name, _))| name)
            .collect();
        // Deterministic statement order regardless of catalog iteration.
        drops.sort();

        if adds.is_empty() && drops.is_empty() {
            debug!(table = %model.name, "schema already in sync");
            return Ok(AlterOutcome::default());
        }
        info!(
            table = %model.name,
            adds = adds.len(),
            drops = drops.len(),
            "reconciling table"
        );

        // Each add/drop is its own statement, so a partial failure
        // leaves the schema in a well-defined intermediate state.
        let mut outcome = AlterOutcome::default();
        for column in adds {
            let sql = AlterTableBuilder::new(dialect.as_ref(), &model.name)
                .case_sensitive(case_sensitive)
                .add_column(column.clone())
                .build()?;
            for statement in split_statements(&sql) {
                debug!(sql = statement, "executing");
                conn.execute(statement)
                    .map_err(|source| SyncError::Execution {
                        sql: statement.to_string(),
                        source,
                    })?;
            }
            outcome.added.push(column.name.clone());
        }
        for column in drops {
            let sql = AlterTableBuilder::new(dialect.as_ref(), &model.name)
                .case_sensitive(case_sensitive)
                .drop_column(column.clone())
                .build()?;
            for statement in split_statements(&sql) {
                debug!(sql = statement, "executing");
                conn.execute(statement)
                    .map_err(|source| SyncError::Execution {
                        sql: statement.to_string(),
                        source,
                    })?;
            }
            outcome.dropped.push(column.clone());
        }
        Ok(outcome)
    }
}
