//! Column-store dialect.
//!
//! Column stores keep their own table keyword (`CREATE COLUMN TABLE`),
//! prefer national character strings, and add unique constraints on
//! existing tables as separate ALTER statements.

use crate::error::{CoreError, Result};
use crate::types::DataType;

use super::{DatabaseSystem, Dialect, NativeType};

/// Dialect for column-store products.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnarDialect;

impl ColumnarDialect {
    /// Creates the dialect.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for ColumnarDialect {
    fn product_name(&self) -> &'static str {
        "columnar"
    }

    fn system(&self) -> DatabaseSystem {
        DatabaseSystem::Columnar
    }

    fn create_table_keyword(&self) -> &'static str {
        "CREATE COLUMN TABLE"
    }

    fn splits_unique_on_add(&self) -> bool {
        true
    }

    fn native_type(&self, data_type: DataType) -> Result<NativeType> {
        let native = match data_type {
            // All character data is national varchar in the column store.
            DataType::Varchar | DataType::Char | DataType::Nvarchar => {
                NativeType::with_length("NVARCHAR")
            }
            DataType::Clob => NativeType::plain("NCLOB"),
            DataType::Integer => NativeType::plain("INTEGER"),
            DataType::SmallInt => NativeType::plain("SMALLINT"),
            DataType::TinyInt => NativeType::plain("TINYINT"),
            DataType::BigInt => NativeType::plain("BIGINT"),
            DataType::Decimal => NativeType::with_length_and_scale("DECIMAL"),
            DataType::Real => NativeType::plain("REAL"),
            DataType::Double => NativeType::plain("DOUBLE"),
            DataType::Boolean => NativeType::plain("BOOLEAN"),
            DataType::Date => NativeType::plain("DATE"),
            DataType::Time => NativeType::plain("TIME"),
            DataType::Timestamp => NativeType::plain("TIMESTAMP"),
            DataType::Blob => NativeType::plain("BLOB"),
            DataType::Bit | DataType::Array => {
                return Err(CoreError::TypeResolution {
                    data_type,
                    dialect: self.product_name().to_string(),
                });
            }
        };
        Ok(native)
    }

    fn drop_column_sql(&self, table: &str, column: &str) -> String {
        format!("ALTER TABLE {table} DROP ({column})")
    }

    fn modify_column_sql(&self, table: &str, definition: &str) -> String {
        format!("ALTER TABLE {table} ALTER ({definition})")
    }

    fn next_value_sql(&self, sequence: &str) -> String {
        format!("SELECT {sequence}.NEXTVAL FROM DUMMY")
    }

    fn last_identity_sql(&self) -> String {
        "SELECT CURRENT_IDENTITY_VALUE() FROM DUMMY".to_string()
    }
}
