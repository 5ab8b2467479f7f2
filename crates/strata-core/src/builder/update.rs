//! UPDATE statement builder.

use crate::dialect::Dialect;
use crate::error::{CoreError, Result};
use crate::model::TableModel;

use super::{ParamSlot, Statement};

/// Builds a parameterized UPDATE for a table model.
///
/// SET covers every non-identity, non-key column; the WHERE clause
/// matches the primary key columns.
pub struct UpdateBuilder<'a> {
    dialect: &'a dyn Dialect,
    model: &'a TableModel,
    case_sensitive: bool,
}

impl<'a> UpdateBuilder<'a> {
    /// Creates a builder for the given model.
    #[must_use]
    pub fn from_model(dialect: &'a dyn Dialect, model: &'a TableModel) -> Self {
        Self {
            dialect,
            model,
            case_sensitive: false,
        }
    }

    /// Enables case-sensitive identifier quoting.
    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Builds the statement.
    pub fn build(self) -> Result<Statement> {
        let assignable: Vec<_> = self
            .model
            .columns
            .iter()
            .filter(|c| !c.identity && !c.primary_key)
            .collect();
        if assignable.is_empty() {
            return Err(CoreError::InvalidModel(format!(
                "table '{}' has no assignable columns",
                self.model.name
            )));
        }
        let keys = self.model.primary_key_columns();
        if keys.is_empty() {
            return Err(CoreError::InvalidModel(format!(
                "update on table '{}' requires a primary key",
                self.model.name
            )));
        }

        let mut params = Vec::new();
        let assignments: Vec<String> = assignable
            .iter()
            .map(|c| {
                params.push(ParamSlot {
                    column: c.name.clone(),
                    data_type: c.data_type,
                });
                format!("{} = ?", self.dialect.quote(&c.name, self.case_sensitive))
            })
            .collect();
        let predicates: Vec<String> = keys
            .iter()
            .map(|c| {
                params.push(ParamSlot {
                    column: c.name.clone(),
                    data_type: c.data_type,
                });
                format!("{} = ?", self.dialect.quote(&c.name, self.case_sensitive))
            })
            .collect();

        Ok(Statement {
            sql: format!(
                "UPDATE {} SET {} WHERE {}",
                self.dialect.quote(&self.model.name, self.case_sensitive),
                assignments.join(", "),
                predicates.join(" AND ")
            ),
            params,
        })
    }
}
