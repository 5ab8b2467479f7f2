//! INSERT statement builder.

use crate::dialect::Dialect;
use crate::error::{CoreError, Result};
use crate::model::TableModel;

use super::{ParamSlot, Statement};

/// Builds a parameterized INSERT for a table model.
///
/// Identity columns are never value-assigned: they are excluded from
/// the column list and the parameter slots.
pub struct InsertBuilder<'a> {
    dialect: &'a dyn Dialect,
    model: &'a TableModel,
    case_sensitive: bool,
}

impl<'a> InsertBuilder<'a> {
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
        let insertable: Vec<_> = self.model.columns.iter().filter(|c| !c.identity).collect();
        if insertable.is_empty() {
            return Err(CoreError::InvalidModel(format!(
                "table '{}' has no insertable columns",
                self.model.name
            )));
        }

        let columns: Vec<String> = insertable
            .iter()
            .map(|c| self.dialect.quote(&c.name, self.case_sensitive))
            .collect();
        let placeholders: Vec<&str> = insertable.iter().map(|_| "?").collect();
        let params: Vec<ParamSlot> = insertable
            .iter()
            .map(|c| ParamSlot {
                column: c.name.clone(),
                data_type: c.data_type,
            })
            .collect();

        Ok(Statement {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.dialect.quote(&self.model.name, self.case_sensitive),
                columns.join(", "),
                placeholders.join(", ")
            ),
            params,
        })
    }
}
