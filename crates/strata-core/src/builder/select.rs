//! SELECT statement builder.

use crate::dialect::Dialect;
use crate::error::Result;
use crate::model::{SortOrder, TableModel};
use crate::types::DataType;

use super::{ParamSlot, Statement};

/// Builds a parameterized SELECT.
///
/// With no explicit column list, all model columns are selected in
/// declaration order. Filters become equality predicates bound as
/// parameters.
pub struct SelectBuilder<'a> {
    dialect: &'a dyn Dialect,
    model: &'a TableModel,
    columns: Vec<String>,
    filters: Vec<ParamSlot>,
    order_by: Vec<(String, SortOrder)>,
    case_sensitive: bool,
}

impl<'a> SelectBuilder<'a> {
    /// Creates a builder for the given model.
    #[must_use]
    pub fn from_model(dialect: &'a dyn Dialect, model: &'a TableModel) -> Self {
        Self {
            dialect,
            model,
            columns: Vec::new(),
            filters: Vec::new(),
            order_by: Vec::new(),
            case_sensitive: false,
        }
    }

    /// Restricts the select list to the given column.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Adds an equality filter bound as a parameter.
    #[must_use]
    pub fn filter(mut self, column: impl Into<String>, data_type: DataType) -> Self {
        self.filters.push(ParamSlot {
            column: column.into(),
            data_type,
        });
        self
    }

    /// Adds an ORDER BY term.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by.push((column.into(), order));
        self
    }

    /// Enables case-sensitive identifier quoting.
    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Builds the statement.
    pub fn build(self) -> Result<Statement> {
        let select_list: Vec<String> = if self.columns.is_empty() {
            self.model
                .columns
                .iter()
                .map(|c| self.dialect.quote(&c.name, self.case_sensitive))
                .collect()
        } else {
            self.columns
                .iter()
                .map(|c| self.dialect.quote(c, self.case_sensitive))
                .collect()
        };

        let mut sql = format!(
            "SELECT {} FROM {}",
            select_list.join(", "),
            self.dialect.quote(&self.model.name, self.case_sensitive)
        );

        if !self.filters.is_empty() {
            let predicates: Vec<String> = self
                .filters
                .iter()
                .map(|slot| {
                    format!(
                        "{} = ?",
                        self.dialect.quote(&slot.column, self.case_sensitive)
                    )
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        if !self.order_by.is_empty() {
            let terms: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, order)| {
                    format!(
                        "{} {}",
                        self.dialect.quote(column, self.case_sensitive),
                        order.as_sql()
                    )
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        Ok(Statement {
            sql,
            params: self.filters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::AnsiDialect;
    use crate::model::ColumnModel;

    fn person() -> TableModel {
        TableModel::new("Person")
            .column(ColumnModel::new("id", DataType::Integer).primary_key())
            .column(ColumnModel::new("name", DataType::Varchar).length(50))
            .column(ColumnModel::new("active", DataType::Boolean))
    }

    #[test]
    fn select_all_model_columns() {
        let dialect = AnsiDialect::new();
        let model = person();
        let statement = SelectBuilder::from_model(&dialect, &model).build().unwrap();
        assert_eq!(statement.sql, "SELECT id, name, active FROM Person");
        assert!(statement.params.is_empty());
    }

    #[test]
    fn select_with_filter_and_order() {
        let dialect = AnsiDialect::new();
        let model = person();
        let statement = SelectBuilder::from_model(&dialect, &model)
            .column("id")
            .filter("active", DataType::Boolean)
            .order_by("name", SortOrder::Descending)
            .build()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT id FROM Person WHERE active = ? ORDER BY name DESC"
        );
        assert_eq!(statement.params.len(), 1);
        assert_eq!(statement.params[0].data_type, DataType::Boolean);
    }
}
