//! Dialect abstraction.
//!
//! A [`Dialect`] is a stateless strategy value translating abstract
//! schema concepts into one database product's concrete syntax. Vendor
//! divergence lives in capability hooks with ANSI defaults; builders
//! stay dialect-agnostic and consult the hooks.

mod ansi;
mod columnar;
mod registry;

pub use ansi::AnsiDialect;
pub use columnar::ColumnarDialect;
pub use registry::DialectRegistry;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::ColumnModel;
use crate::types::{DataType, TypeFamily};

/// Database system families a dialect can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseSystem {
    /// Row-store databases following ANSI-ish DDL syntax.
    Ansi,
    /// Column-store databases with their own table/type/constraint syntax.
    Columnar,
}

/// A dialect's native rendering of one abstract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeType {
    /// Native type name.
    pub name: &'static str,
    /// Whether a declared length is emitted as `TYPE(len)`.
    pub emits_length: bool,
    /// Whether a declared scale is emitted as `TYPE(len, scale)`.
    pub emits_scale: bool,
}

impl NativeType {
    /// A type that takes no arguments.
    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            emits_length: false,
            emits_scale: false,
        }
    }

    /// A type that takes a length argument.
    #[must_use]
    pub const fn with_length(name: &'static str) -> Self {
        Self {
            name,
            emits_length: true,
            emits_scale: false,
        }
    }

    /// A type that takes length and scale arguments.
    #[must_use]
    pub const fn with_length_and_scale(name: &'static str) -> Self {
        Self {
            name,
            emits_length: true,
            emits_scale: true,
        }
    }
}

/// Strategy trait for one database product's SQL syntax.
///
/// Default methods implement the ANSI-ish rendering; vendor dialects
/// override only the hooks where their syntax diverges.
pub trait Dialect: Send + Sync {
    /// Product name this dialect matches against connection metadata.
    fn product_name(&self) -> &'static str;

    /// Database system family.
    fn system(&self) -> DatabaseSystem;

    /// Maps an abstract type to its native rendering. Unknown types
    /// must fail with [`CoreError::TypeResolution`](crate::CoreError),
    /// never silently default.
    fn native_type(&self, data_type: DataType) -> Result<NativeType>;

    /// Identifier escape symbol used in case-sensitive mode.
    fn escape_symbol(&self) -> char {
        '"'
    }

    /// Keyword for NOT NULL.
    fn not_null_keyword(&self) -> &'static str {
        "NOT NULL"
    }

    /// Keyword for PRIMARY KEY.
    fn primary_key_keyword(&self) -> &'static str {
        "PRIMARY KEY"
    }

    /// Keyword for UNIQUE.
    fn unique_keyword(&self) -> &'static str {
        "UNIQUE"
    }

    /// Keyword marking an identity (auto-generated) column.
    fn identity_keyword(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }

    /// Leading keyword of CREATE TABLE.
    fn create_table_keyword(&self) -> &'static str {
        "CREATE TABLE"
    }

    /// Whether adding a UNIQUE column emits the column ADD and the
    /// unique-constraint addition as two separate statements.
    fn splits_unique_on_add(&self) -> bool {
        false
    }

    /// Quotes an identifier when case-sensitive mode is active;
    /// otherwise passes it through verbatim.
    fn quote(&self, identifier: &str, case_sensitive: bool) -> String {
        if case_sensitive {
            let q = self.escape_symbol();
            format!("{q}{identifier}{q}")
        } else {
            identifier.to_string()
        }
    }

    /// Renders a column's native type with its length/scale arguments.
    fn render_data_type(&self, column: &ColumnModel) -> Result<String> {
        let native = self.native_type(column.data_type)?;
        let rendered = match (native.emits_length, native.emits_scale) {
            (true, true) => match (column.length, column.scale) {
                (Some(len), Some(scale)) => format!("{}({len}, {scale})", native.name),
                (Some(len), None) => format!("{}({len})", native.name),
                _ => native.name.to_string(),
            },
            (true, false) => match column.length {
                Some(len) => format!("{}({len})", native.name),
                None => native.name.to_string(),
            },
            _ => native.name.to_string(),
        };
        Ok(rendered)
    }

    /// Renders a full column definition:
    /// `name type(args) [identity] [NOT NULL] [PRIMARY KEY] [UNIQUE] [DEFAULT lit]`.
    ///
    /// `inline_primary_key` is false when the table has a composite key
    /// (emitted as a trailing clause instead); `inline_unique` is false
    /// when the dialect adds the unique constraint separately.
    fn render_column_definition(
        &self,
        column: &ColumnModel,
        inline_primary_key: bool,
        inline_unique: bool,
        case_sensitive: bool,
    ) -> Result<String> {
        let mut sql = format!(
            "{} {}",
            self.quote(&column.name, case_sensitive),
            self.render_data_type(column)?
        );

        if column.identity {
            sql.push(' ');
            sql.push_str(self.identity_keyword());
        }
        if !column.nullable {
            sql.push(' ');
            sql.push_str(self.not_null_keyword());
        }
        if column.primary_key && inline_primary_key {
            sql.push(' ');
            sql.push_str(self.primary_key_keyword());
        }
        if column.unique && inline_unique {
            sql.push(' ');
            sql.push_str(self.unique_keyword());
        }
        if let Some(default) = &column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&self.render_default_literal(column, default));
        }

        Ok(sql)
    }

    /// Renders a default value literal. Character-family defaults are
    /// always quoted; numeric/boolean defaults are emitted verbatim.
    fn render_default_literal(&self, column: &ColumnModel, literal: &str) -> String {
        if column.data_type.is_kind_of(TypeFamily::Character)
            || column.data_type.is_kind_of(TypeFamily::Temporal)
        {
            format!("'{}'", literal.replace('\'', "''"))
        } else {
            literal.to_string()
        }
    }

    /// ALTER statement adding one column. `definition` is a rendered
    /// column definition, `table` is already quoted.
    fn add_column_sql(&self, table: &str, definition: &str) -> String {
        format!("ALTER TABLE {table} ADD ({definition})")
    }

    /// ALTER statement dropping one column.
    fn drop_column_sql(&self, table: &str, column: &str) -> String {
        format!("ALTER TABLE {table} DROP COLUMN {column}")
    }

    /// ALTER statement changing one column's type. `definition` is
    /// `name type(args)` without constraint keywords.
    fn modify_column_sql(&self, table: &str, definition: &str) -> String {
        format!("ALTER TABLE {table} ALTER COLUMN {definition}")
    }

    /// Query returning the next value of a sequence.
    fn next_value_sql(&self, sequence: &str) -> String {
        format!("SELECT NEXT VALUE FOR {sequence}")
    }

    /// Query returning the last generated identity value.
    fn last_identity_sql(&self) -> String {
        "CALL IDENTITY()".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_only_when_case_sensitive() {
        let dialect = AnsiDialect::new();
        assert_eq!(dialect.quote("person", false), "person");
        assert_eq!(dialect.quote("person", true), "\"person\"");
    }

    #[test]
    fn character_defaults_are_quoted() {
        let dialect = AnsiDialect::new();
        let name = ColumnModel::new("name", DataType::Varchar)
            .length(50)
            .default("n/a");
        let rendered = dialect
            .render_column_definition(&name, true, true, false)
            .unwrap();
        assert_eq!(rendered, "name VARCHAR(50) DEFAULT 'n/a'");

        let count = ColumnModel::new("count", DataType::Integer).default("0");
        let rendered = dialect
            .render_column_definition(&count, true, true, false)
            .unwrap();
        assert_eq!(rendered, "count INTEGER DEFAULT 0");
    }

    #[test]
    fn identity_and_not_null_ordering() {
        let dialect = AnsiDialect::new();
        let id = ColumnModel::new("id", DataType::Integer)
            .primary_key()
            .identity();
        let rendered = dialect
            .render_column_definition(&id, true, true, false)
            .unwrap();
        assert_eq!(
            rendered,
            "id INTEGER GENERATED BY DEFAULT AS IDENTITY NOT NULL PRIMARY KEY"
        );
    }
}
