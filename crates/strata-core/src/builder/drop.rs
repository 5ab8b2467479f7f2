//! DROP TABLE builder.

use crate::dialect::Dialect;
use crate::model::TableModel;

use super::STATEMENT_DELIMITER;

/// Builds `DROP TABLE`, optionally preceded by per-constraint
/// `DROP CONSTRAINT` statements so referential integrity ordering is
/// satisfied before the table goes away.
pub struct DropTableBuilder<'a> {
    dialect: &'a dyn Dialect,
    table: String,
    constraints: Vec<String>,
    case_sensitive: bool,
}

impl<'a> DropTableBuilder<'a> {
    /// Creates a builder for the given table.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            constraints: Vec::new(),
            case_sensitive: false,
        }
    }

    /// Creates a builder dropping the model's declared foreign keys
    /// before the table itself.
    #[must_use]
    pub fn from_model(dialect: &'a dyn Dialect, model: &TableModel) -> Self {
        let constraints = model.constraints.as_ref().map_or_else(Vec::new, |c| {
            c.foreign_keys.iter().map(|fk| fk.name.clone()).collect()
        });
        Self {
            dialect,
            table: model.name.clone(),
            constraints,
            case_sensitive: false,
        }
    }

    /// Enables case-sensitive identifier quoting.
    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Queues a constraint to drop before the table.
    #[must_use]
    pub fn constraint(mut self, name: impl Into<String>) -> Self {
        self.constraints.push(name.into());
        self
    }

    /// Builds the delimiter-joined DROP statements.
    #[must_use]
    pub fn build(self) -> String {
        let table = self.dialect.quote(&self.table, self.case_sensitive);
        let mut statements: Vec<String> = self
            .constraints
            .iter()
            .map(|name| {
                format!(
                    "ALTER TABLE {table} DROP CONSTRAINT {}",
                    self.dialect.quote(name, self.case_sensitive)
                )
            })
            .collect();
        statements.push(format!("DROP TABLE {table}"));
        statements.join(STATEMENT_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::split_statements;
    use crate::dialect::AnsiDialect;
    use crate::model::{ColumnModel, ConstraintsModel, ForeignKeyModel};
    use crate::types::DataType;

    #[test]
    fn plain_drop() {
        let dialect = AnsiDialect::new();
        let sql = DropTableBuilder::new(&dialect, "Person").build();
        assert_eq!(sql, "DROP TABLE Person");
    }

    #[test]
    fn constraints_drop_before_table() {
        let dialect = AnsiDialect::new();
        let model = TableModel::new("orders")
            .column(ColumnModel::new("id", DataType::Integer).primary_key())
            .constraints(ConstraintsModel::new().foreign_key(ForeignKeyModel {
                name: "fk_customer".into(),
                columns: vec!["customer_id".into()],
                references_table: "customers".into(),
                references_columns: vec!["id".into()],
            }));

        let sql = DropTableBuilder::from_model(&dialect, &model).build();
        let statements = split_statements(&sql);
        assert_eq!(
            statements,
            [
                "ALTER TABLE orders DROP CONSTRAINT fk_customer",
                "DROP TABLE orders"
            ]
        );
    }
}
