//! ALTER TABLE builder.

use crate::dialect::Dialect;
use crate::error::{CoreError, Result};
use crate::model::ColumnModel;

use super::STATEMENT_DELIMITER;

/// Builds ALTER TABLE statements in one of three modes: ADD columns,
/// DROP columns, or MODIFY column types. The mode is selected by which
/// accumulator was populated; exactly one must be.
///
/// Single-use: `build` consumes the builder.
pub struct AlterTableBuilder<'a> {
    dialect: &'a dyn Dialect,
    table: String,
    adds: Vec<ColumnModel>,
    drops: Vec<String>,
    modifies: Vec<ColumnModel>,
    case_sensitive: bool,
}

impl<'a> AlterTableBuilder<'a> {
    /// Creates a builder for the given table.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            adds: Vec::new(),
            drops: Vec::new(),
            modifies: Vec::new(),
            case_sensitive: false,
        }
    }

    /// Enables case-sensitive identifier quoting.
    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Queues a column addition.
    #[must_use]
    pub fn add_column(mut self, column: ColumnModel) -> Self {
        self.adds.push(column);
        self
    }

    /// Queues a column drop.
    #[must_use]
    pub fn drop_column(mut self, column: impl Into<String>) -> Self {
        self.drops.push(column.into());
        self
    }

    /// Queues a column type change.
    #[must_use]
    pub fn modify_column(mut self, column: ColumnModel) -> Self {
        self.modifies.push(column);
        self
    }

    /// Builds the delimiter-joined ALTER statements.
    pub fn build(self) -> Result<String> {
        let populated = [
            !self.adds.is_empty(),
            !self.drops.is_empty(),
            !self.modifies.is_empty(),
        ]
        .iter()
        .filter(|p| **p)
        .count();
        if populated != 1 {
            return Err(CoreError::InvalidModel(format!(
                "alter on table '{}' must use exactly one of ADD, DROP, or MODIFY",
                self.table
            )));
        }

        let table = self.dialect.quote(&self.table, self.case_sensitive);
        let mut statements = Vec::new();

        for column in &self.adds {
            // Dialects that cannot inline UNIQUE on ADD get the column
            // first and the constraint as a follow-up statement.
            let split_unique = column.unique && self.dialect.splits_unique_on_add();
            let definition = self.dialect.render_column_definition(
                column,
                false,
                !split_unique,
                self.case_sensitive,
            )?;
            statements.push(self.dialect.add_column_sql(&table, &definition));
            if split_unique {
                let quoted_column = self.dialect.quote(&column.name, self.case_sensitive);
                let constraint = self.dialect.quote(
                    &format!("{}_{}_unq", self.table, column.name),
                    self.case_sensitive,
                );
                statements.push(format!(
                    "ALTER TABLE {table} ADD CONSTRAINT {constraint} {} ({quoted_column})",
                    self.dialect.unique_keyword()
                ));
            }
        }

        for column in &self.drops {
            let quoted = self.dialect.quote(column, self.case_sensitive);
            statements.push(self.dialect.drop_column_sql(&table, &quoted));
        }

        for column in &self.modifies {
            let definition = format!(
                "{} {}",
                self.dialect.quote(&column.name, self.case_sensitive),
                self.dialect.render_data_type(column)?
            );
            statements.push(self.dialect.modify_column_sql(&table, &definition));
        }

        Ok(statements.join(STATEMENT_DELIMITER))
    }
}
