//! Default row-store dialect with ANSI-ish syntax.

use crate::error::Result;
use crate::types::DataType;

use super::{DatabaseSystem, Dialect, NativeType};

/// The default dialect. Every abstract type resolves here, so it also
/// serves as the fallback for products without a specialized dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDialect;

impl AnsiDialect {
    /// Creates the dialect.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for AnsiDialect {
    fn product_name(&self) -> &'static str {
        "ansi"
    }

    fn system(&self) -> DatabaseSystem {
        DatabaseSystem::Ansi
    }

    fn native_type(&self, data_type: DataType) -> Result<NativeType> {
        let native = match data_type {
            DataType::Varchar => NativeType::with_length("VARCHAR"),
            DataType::Char => NativeType::with_length("CHAR"),
            DataType::Nvarchar => NativeType::with_length("NVARCHAR"),
            DataType::Clob => NativeType::plain("CLOB"),
            DataType::Integer => NativeType::plain("INTEGER"),
            DataType::SmallInt => NativeType::plain("SMALLINT"),
            DataType::TinyInt => NativeType::plain("TINYINT"),
            DataType::BigInt => NativeType::plain("BIGINT"),
            DataType::Decimal => NativeType::with_length_and_scale("DECIMAL"),
            DataType::Real => NativeType::plain("REAL"),
            DataType::Double => NativeType::plain("DOUBLE"),
            DataType::Boolean => NativeType::plain("BOOLEAN"),
            DataType::Bit => NativeType::plain("BIT"),
            DataType::Date => NativeType::plain("DATE"),
            DataType::Time => NativeType::plain("TIME"),
            DataType::Timestamp => NativeType::plain("TIMESTAMP"),
            DataType::Blob => NativeType::plain("BLOB"),
            DataType::Array => NativeType::plain("ARRAY"),
        };
        Ok(native)
    }
}
