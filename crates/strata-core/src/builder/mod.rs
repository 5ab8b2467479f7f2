//! SQL statement builders.
//!
//! Each builder is a single-use accumulator: fluent configuration
//! methods, then one terminal `build(self)`. DDL builders yield SQL
//! text which may contain several statements joined by
//! [`STATEMENT_DELIMITER`]; DML builders yield a [`Statement`] with
//! `?` placeholders and the parameter slots describing them.

mod alter;
mod create;
mod delete;
mod drop;
mod insert;
mod select;
mod sequence;
mod update;

pub use alter::AlterTableBuilder;
pub use create::CreateTableBuilder;
pub use delete::DeleteBuilder;
pub use drop::DropTableBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use sequence::{LastIdentityBuilder, NextSequenceBuilder};
pub use update::UpdateBuilder;

use core::fmt;

use crate::types::DataType;

/// Sentinel separating statements in builder output. Callers must
/// split on this before execution; a single `build()` may yield
/// several statements.
pub const STATEMENT_DELIMITER: &str = ";\n";

/// Splits builder output into individual statements, dropping empty
/// fragments.
#[must_use]
pub fn split_statements(sql: &str) -> Vec<&str> {
    sql.split(STATEMENT_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// One `?` placeholder in a built statement: which column it binds and
/// with which abstract type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSlot {
    /// Column the placeholder belongs to.
    pub column: String,
    /// Abstract type the bound value must marshal as.
    pub data_type: DataType,
}

/// An immutable built statement: SQL text plus its parameter slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Parameter slots in placeholder order.
    pub params: Vec<ParamSlot>,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_statements_drops_empty_fragments() {
        let joined = format!("CREATE TABLE t (id INTEGER){STATEMENT_DELIMITER}CREATE INDEX i ON t (id){STATEMENT_DELIMITER}");
        let statements = split_statements(&joined);
        assert_eq!(
            statements,
            ["CREATE TABLE t (id INTEGER)", "CREATE INDEX i ON t (id)"]
        );
    }

    #[test]
    fn single_statement_passes_through() {
        assert_eq!(split_statements("DROP TABLE t"), ["DROP TABLE t"]);
    }
}
