//! Declarative table models.
//!
//! These types describe what a table should look like. They are supplied
//! by callers per synchronization cycle; the reconciliation processors
//! compare them against the live catalog and the builders turn them into
//! dialect-correct SQL.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::DataType;

/// How an enum-valued column is stored. Columns that declare no
/// encoding store ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnumEncoding {
    /// Store the zero-based ordinal of the constant as an integer.
    #[default]
    Ordinal,
    /// Store the constant's name as a string.
    Name,
}

/// Sort order for indexes and ORDER BY clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Ascending,
    /// Descending.
    Descending,
}

impl SortOrder {
    /// Returns the SQL keyword for this order.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Physical index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexKind {
    /// B-tree (the default everywhere).
    #[default]
    BTree,
    /// Hash index.
    Hash,
}

/// A single column in a table model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnModel {
    /// Column name.
    pub name: String,
    /// Abstract data type.
    pub data_type: DataType,
    /// Declared length (characters for strings, precision for decimals).
    pub length: Option<u32>,
    /// Declared scale (decimals only).
    pub scale: Option<u32>,
    /// Whether the column allows NULL values.
    pub nullable: bool,
    /// Whether this column is flagged as (part of) the primary key.
    pub primary_key: bool,
    /// Whether this column carries a UNIQUE constraint.
    pub unique: bool,
    /// Default value literal, if any.
    pub default: Option<String>,
    /// Enum encoding for enum-valued columns.
    pub enum_encoding: Option<EnumEncoding>,
    /// Whether the database generates this column's value. Identity
    /// columns are never directly value-assigned during insert.
    pub identity: bool,
}

impl ColumnModel {
    /// Creates a new nullable column of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            length: None,
            scale: None,
            nullable: true,
            primary_key: false,
            unique: false,
            default: None,
            enum_encoding: None,
            identity: false,
        }
    }

    /// Sets the declared length.
    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the declared scale.
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as primary key. Primary keys are implicitly
    /// NOT NULL.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Marks the column UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the default value literal.
    #[must_use]
    pub fn default(mut self, literal: impl Into<String>) -> Self {
        self.default = Some(literal.into());
        self
    }

    /// Sets the enum encoding for this column.
    #[must_use]
    pub fn enum_encoding(mut self, encoding: EnumEncoding) -> Self {
        self.enum_encoding = Some(encoding);
        self
    }

    /// Marks the column as identity (auto-generated).
    #[must_use]
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
}

/// An explicit (possibly composite) primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeyModel {
    /// Optional constraint name.
    pub name: Option<String>,
    /// Key columns in order.
    pub columns: Vec<String>,
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyModel {
    /// Constraint name.
    pub name: String,
    /// Columns in this table.
    pub columns: Vec<String>,
    /// Referenced table.
    pub references_table: String,
    /// Referenced columns (same arity as `columns`).
    pub references_columns: Vec<String>,
}

/// A named unique index declared as a table constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueIndexModel {
    /// Constraint name.
    pub name: String,
    /// Covered columns.
    pub columns: Vec<String>,
}

/// A check constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckModel {
    /// Constraint name.
    pub name: String,
    /// Boolean expression text.
    pub expression: String,
}

/// Table-level constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintsModel {
    /// Explicit primary key (overrides per-column flags when present).
    pub primary_key: Option<PrimaryKeyModel>,
    /// Foreign keys.
    pub foreign_keys: Vec<ForeignKeyModel>,
    /// Unique indexes declared as constraints.
    pub unique_indexes: Vec<UniqueIndexModel>,
    /// Check constraints.
    pub checks: Vec<CheckModel>,
}

impl ConstraintsModel {
    /// Creates an empty constraints model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary key.
    #[must_use]
    pub fn primary_key(mut self, name: Option<String>, columns: Vec<String>) -> Self {
        self.primary_key = Some(PrimaryKeyModel { name, columns });
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, fk: ForeignKeyModel) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Adds a unique index constraint.
    #[must_use]
    pub fn unique_index(mut self, unique: UniqueIndexModel) -> Self {
        self.unique_indexes.push(unique);
        self
    }

    /// Adds a check constraint.
    #[must_use]
    pub fn check(mut self, check: CheckModel) -> Self {
        self.checks.push(check);
        self
    }
}

/// A secondary index emitted as a standalone CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexModel {
    /// Index name.
    pub name: String,
    /// Target columns.
    pub columns: Vec<String>,
    /// Whether this is a unique index.
    pub unique: bool,
    /// Sort order.
    pub order: SortOrder,
    /// Index kind.
    pub kind: IndexKind,
}

impl IndexModel {
    /// Creates a non-unique B-tree index.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: false,
            order: SortOrder::Ascending,
            kind: IndexKind::BTree,
        }
    }

    /// Marks the index unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the index kind.
    #[must_use]
    pub fn kind(mut self, kind: IndexKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A complete table model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableModel {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnModel>,
    /// Table-level constraints.
    pub constraints: Option<ConstraintsModel>,
    /// Secondary indexes.
    pub indexes: Vec<IndexModel>,
}

impl TableModel {
    /// Creates an empty table model.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            constraints: None,
            indexes: Vec::new(),
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: ColumnModel) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the constraints model.
    #[must_use]
    pub fn constraints(mut self, constraints: ConstraintsModel) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Adds a secondary index.
    #[must_use]
    pub fn index(mut self, index: IndexModel) -> Self {
        self.indexes.push(index);
        self
    }

    /// Looks up a column by name (exact match).
    #[must_use]
    pub fn column_named(&self, name: &str) -> Option<&ColumnModel> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the first column flagged as primary key.
    #[must_use]
    pub fn primary_key_column(&self) -> Option<&ColumnModel> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Returns the columns flagged as primary key, in declaration order.
    #[must_use]
    pub fn primary_key_columns(&self) -> Vec<&ColumnModel> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    /// Validates structural invariants: at least one column, unique
    /// column names (case-insensitive unless `case_sensitive`), and
    /// equal-arity foreign keys.
    pub fn validate(&self, case_sensitive: bool) -> Result<()> {
        if self.columns.is_empty() {
            return Err(CoreError::InvalidModel(format!(
                "table '{}' has no columns",
                self.name
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            let key = if case_sensitive {
                column.name.clone()
            } else {
                column.name.to_uppercase()
            };
            if !seen.insert(key) {
                return Err(CoreError::InvalidModel(format!(
                    "table '{}' declares column '{}' more than once",
                    self.name, column.name
                )));
            }
        }

        if let Some(constraints) = &self.constraints {
            for fk in &constraints.foreign_keys {
                if fk.columns.len() != fk.references_columns.len() {
                    return Err(CoreError::InvalidModel(format!(
                        "foreign key '{}' on table '{}' has {} local column(s) but {} referenced column(s)",
                        fk.name,
                        self.name,
                        fk.columns.len(),
                        fk.references_columns.len()
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_model_builder() {
        let col = ColumnModel::new("id", DataType::Integer)
            .primary_key()
            .identity();

        assert_eq!(col.name, "id");
        assert!(col.primary_key);
        assert!(col.identity);
        assert!(!col.nullable); // primary keys are NOT NULL
    }

    #[test]
    fn validate_rejects_empty_table() {
        let table = TableModel::new("empty");
        assert!(matches!(
            table.validate(false),
            Err(CoreError::InvalidModel(_))
        ));
    }

    #[test]
    fn validate_rejects_duplicate_names_case_insensitive() {
        let table = TableModel::new("t")
            .column(ColumnModel::new("Name", DataType::Varchar).length(50))
            .column(ColumnModel::new("NAME", DataType::Varchar).length(50));
        assert!(table.validate(false).is_err());
        // Case-sensitive mode treats them as distinct.
        assert!(table.validate(true).is_ok());
    }

    #[test]
    fn validate_rejects_mismatched_foreign_key_arity() {
        let table = TableModel::new("orders")
            .column(ColumnModel::new("id", DataType::Integer).primary_key())
            .constraints(ConstraintsModel::new().foreign_key(ForeignKeyModel {
                name: "fk_customer".into(),
                columns: vec!["customer_id".into()],
                references_table: "customers".into(),
                references_columns: vec!["id".into(), "tenant".into()],
            }));
        assert!(table.validate(false).is_err());
    }

    #[test]
    fn table_model_round_trips_through_json() {
        let table = TableModel::new("person")
            .column(
                ColumnModel::new("id", DataType::Integer)
                    .primary_key()
                    .identity(),
            )
            .column(
                ColumnModel::new("status", DataType::Integer)
                    .enum_encoding(EnumEncoding::Ordinal),
            )
            .index(IndexModel::new("idx_status", vec!["status".into()]));

        let json = serde_json::to_string(&table).unwrap();
        let back: TableModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn primary_key_lookup() {
        let table = TableModel::new("person")
            .column(ColumnModel::new("id", DataType::Integer).primary_key())
            .column(ColumnModel::new("name", DataType::Varchar).length(50));
        assert_eq!(table.primary_key_column().map(|c| c.name.as_str()), Some("id"));
        assert_eq!(table.primary_key_columns().len(), 1);
    }
}
