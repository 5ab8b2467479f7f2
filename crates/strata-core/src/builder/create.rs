//! CREATE TABLE builder.

use crate::dialect::Dialect;
use crate::error::{CoreError, Result};
use crate::model::{ColumnModel, ConstraintsModel, IndexModel, TableModel};

use super::STATEMENT_DELIMITER;

/// Builds a CREATE TABLE statement (plus standalone CREATE INDEX
/// statements for secondary indexes, delimiter-joined).
///
/// Single-use: `build` consumes the builder.
pub struct CreateTableBuilder<'a> {
    dialect: &'a dyn Dialect,
    table: String,
    columns: Vec<ColumnModel>,
    constraints: Option<ConstraintsModel>,
    indexes: Vec<IndexModel>,
    case_sensitive: bool,
    skip_foreign_keys: bool,
}

impl<'a> CreateTableBuilder<'a> {
    /// Creates a builder for the given table name.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            columns: Vec::new(),
            constraints: None,
            indexes: Vec::new(),
            case_sensitive: false,
            skip_foreign_keys: false,
        }
    }

    /// Creates a builder pre-populated from a table model.
    #[must_use]
    pub fn from_model(dialect: &'a dyn Dialect, model: &TableModel) -> Self {
        Self {
            dialect,
            table: model.name.clone(),
            columns: model.columns.clone(),
            constraints: model.constraints.clone(),
            indexes: model.indexes.clone(),
            case_sensitive: false,
            skip_foreign_keys: false,
        }
    }

    /// Appends a column (declaration order is preserved).
    #[must_use]
    pub fn column(mut self, column: ColumnModel) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the table constraints.
    #[must_use]
    pub fn constraints(mut self, constraints: ConstraintsModel) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Appends a secondary index.
    #[must_use]
    pub fn index(mut self, index: IndexModel) -> Self {
        self.indexes.push(index);
        self
    }

    /// Enables case-sensitive identifier quoting.
    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Skips foreign-key clauses (two-phase create: the caller adds
    /// them after all referenced tables exist).
    #[must_use]
    pub fn skip_foreign_keys(mut self, enabled: bool) -> Self {
        self.skip_foreign_keys = enabled;
        self
    }

    /// Builds the delimiter-joined CREATE TABLE (+ CREATE INDEX) SQL.
    pub fn build(self) -> Result<String> {
        if self.columns.is_empty() {
            return Err(CoreError::InvalidModel(format!(
                "cannot create table '{}' with no columns",
                self.table
            )));
        }

        let quoted_table = self.dialect.quote(&self.table, self.case_sensitive);

        // Composite keys (explicit or via multiple flagged columns)
        // are emitted as a trailing PRIMARY KEY clause instead of
        // per-column keywords.
        let explicit_pk = self
            .constraints
            .as_ref()
            .and_then(|c| c.primary_key.as_ref());
        let flagged: Vec<&ColumnModel> = self.columns.iter().filter(|c| c.primary_key).collect();
        let trailing_pk_columns: Option<Vec<String>> = if let Some(pk) = explicit_pk {
            Some(pk.columns.clone())
        } else if flagged.len() > 1 {
            Some(flagged.iter().map(|c| c.name.clone()).collect())
        } else {
            None
        };
        let inline_pk = trailing_pk_columns.is_none();

        let mut clauses = Vec::new();
        for column in &self.columns {
            clauses.push(self.dialect.render_column_definition(
                column,
                inline_pk,
                true,
                self.case_sensitive,
            )?);
        }

        if let Some(pk_columns) = &trailing_pk_columns {
            let cols: Vec<String> = pk_columns
                .iter()
                .map(|c| self.dialect.quote(c, self.case_sensitive))
                .collect();
            clauses.push(format!(
                "{} ({})",
                self.dialect.primary_key_keyword(),
                cols.join(", ")
            ));
        }

        // Trailing constraint clauses in fixed order: foreign keys,
        // unique indexes, checks.
        if let Some(constraints) = &self.constraints {
            if !self.skip_foreign_keys {
                for fk in &constraints.foreign_keys {
                    let local: Vec<String> = fk
                        .columns
                        .iter()
                        .map(|c| self.dialect.quote(c, self.case_sensitive))
                        .collect();
                    let referenced: Vec<String> = fk
                        .references_columns
                        .iter()
                        .map(|c| self.dialect.quote(c, self.case_sensitive))
                        .collect();
                    clauses.push(format!(
                        "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
                        self.dialect.quote(&fk.name, self.case_sensitive),
                        local.join(", "),
                        self.dialect
                            .quote(&fk.references_table, self.case_sensitive),
                        referenced.join(", ")
                    ));
                }
            }
            for unique in &constraints.unique_indexes {
                let cols: Vec<String> = unique
                    .columns
                    .iter()
                    .map(|c| self.dialect.quote(c, self.case_sensitive))
                    .collect();
                clauses.push(format!(
                    "CONSTRAINT {} {} ({})",
                    self.dialect.quote(&unique.name, self.case_sensitive),
                    self.dialect.unique_keyword(),
                    cols.join(", ")
                ));
            }
            for check in &constraints.checks {
                clauses.push(format!(
                    "CONSTRAINT {} CHECK ({})",
                    self.dialect.quote(&check.name, self.case_sensitive),
                    check.expression
                ));
            }
        }

        let mut statements = vec![format!(
            "{} {} ({})",
            self.dialect.create_table_keyword(),
            quoted_table,
            clauses.join(", ")
        )];

        for index in &self.indexes {
            let cols: Vec<String> = index
                .columns
                .iter()
                .map(|c| {
                    format!(
                        "{} {}",
                        self.dialect.quote(c, self.case_sensitive),
                        index.order.as_sql()
                    )
                })
                .collect();
            let unique = if index.unique { "UNIQUE " } else { "" };
            statements.push(format!(
                "CREATE {}INDEX {} ON {} ({})",
                unique,
                self.dialect.quote(&index.name, self.case_sensitive),
                quoted_table,
                cols.join(", ")
            ));
        }

        Ok(statements.join(STATEMENT_DELIMITER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::split_statements;
    use crate::dialect::{AnsiDialect, ColumnarDialect};
    use crate::model::{CheckModel, ForeignKeyModel, SortOrder, UniqueIndexModel};
    use crate::types::DataType;

    fn person() -> TableModel {
        TableModel::new("Person")
            .column(
                ColumnModel::new("id", DataType::Integer)
                    .primary_key()
                    .identity(),
            )
            .column(
                ColumnModel::new("name", DataType::Varchar)
                    .length(50)
                    .not_null(),
            )
            .column(ColumnModel::new("active", DataType::Boolean))
    }

    #[test]
    fn simple_create_table() {
        let dialect = AnsiDialect::new();
        let sql = CreateTableBuilder::from_model(&dialect, &person())
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE Person (id INTEGER GENERATED BY DEFAULT AS IDENTITY NOT NULL PRIMARY KEY, \
             name VARCHAR(50) NOT NULL, active BOOLEAN)"
        );
    }

    #[test]
    fn zero_columns_is_invalid() {
        let dialect = AnsiDialect::new();
        let result = CreateTableBuilder::new(&dialect, "empty").build();
        assert!(matches!(result, Err(CoreError::InvalidModel(_))));
    }

    #[test]
    fn composite_primary_key_is_a_trailing_clause() {
        let dialect = AnsiDialect::new();
        let sql = CreateTableBuilder::new(&dialect, "membership")
            .column(ColumnModel::new("user_id", DataType::Integer).primary_key())
            .column(ColumnModel::new("group_id", DataType::Integer).primary_key())
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE membership (user_id INTEGER NOT NULL, group_id INTEGER NOT NULL, \
             PRIMARY KEY (user_id, group_id))"
        );
    }

    #[test]
    fn constraint_clause_order_is_fk_unique_check() {
        let dialect = AnsiDialect::new();
        let sql = CreateTableBuilder::new(&dialect, "orders")
            .column(ColumnModel::new("id", DataType::Integer).primary_key())
            .column(ColumnModel::new("customer_id", DataType::Integer))
            .column(ColumnModel::new("code", DataType::Varchar).length(20))
            .constraints(
                ConstraintsModel::new()
                    .check(CheckModel {
                        name: "chk_code".into(),
                        expression: "LENGTH(code) > 0".into(),
                    })
                    .unique_index(UniqueIndexModel {
                        name: "unq_code".into(),
                        columns: vec!["code".into()],
                    })
                    .foreign_key(ForeignKeyModel {
                        name: "fk_customer".into(),
                        columns: vec!["customer_id".into()],
                        references_table: "customers".into(),
                        references_columns: vec!["id".into()],
                    }),
            )
            .build()
            .unwrap();

        let fk = sql.find("FOREIGN KEY").unwrap();
        let unique = sql.find("unq_code").unwrap();
        let check = sql.find("CHECK").unwrap();
        assert!(fk < unique && unique < check);
    }

    #[test]
    fn skip_foreign_keys_for_two_phase_create() {
        let dialect = AnsiDialect::new();
        let sql = CreateTableBuilder::new(&dialect, "orders")
            .column(ColumnModel::new("customer_id", DataType::Integer))
            .constraints(ConstraintsModel::new().foreign_key(ForeignKeyModel {
                name: "fk_customer".into(),
                columns: vec!["customer_id".into()],
                references_table: "customers".into(),
                references_columns: vec!["id".into()],
            }))
            .skip_foreign_keys(true)
            .build()
            .unwrap();
        assert!(!sql.contains("FOREIGN KEY"));
    }

    #[test]
    fn secondary_indexes_are_standalone_statements() {
        let dialect = AnsiDialect::new();
        let sql = CreateTableBuilder::from_model(
            &dialect,
            &person().index(
                IndexModel::new("idx_person_name", vec!["name".into()]).order(SortOrder::Descending),
            ),
        )
        .build()
        .unwrap();

        let statements = split_statements(&sql);
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[1],
            "CREATE INDEX idx_person_name ON Person (name DESC)"
        );
    }

    #[test]
    fn case_sensitive_mode_quotes_identifiers() {
        let dialect = AnsiDialect::new();
        let sql = CreateTableBuilder::new(&dialect, "Person")
            .column(ColumnModel::new("id", DataType::Integer).primary_key())
            .case_sensitive(true)
            .build()
            .unwrap();
        assert!(sql.starts_with("CREATE TABLE \"Person\" (\"id\" INTEGER"));
    }

    #[test]
    fn columnar_dialect_uses_column_table_keyword() {
        let dialect = ColumnarDialect::new();
        let sql = CreateTableBuilder::from_model(&dialect, &person())
            .build()
            .unwrap();
        assert!(sql.starts_with("CREATE COLUMN TABLE Person ("));
        assert!(sql.contains("name NVARCHAR(50) NOT NULL"));
    }
}
