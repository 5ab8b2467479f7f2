//! The abstract column type registry.
//!
//! [`DataType`] is the closed enumeration of column types the engine
//! understands, independent of any one dialect's native type names.
//! Dialects map each entry to a native name; the registry itself only
//! knows families and driver-level type codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Abstract column data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Variable-length character string.
    Varchar,
    /// Fixed-length character string.
    Char,
    /// Variable-length national character string.
    Nvarchar,
    /// Character large object.
    Clob,
    /// Integer (32-bit).
    Integer,
    /// Small integer (16-bit).
    SmallInt,
    /// Tiny integer (8-bit).
    TinyInt,
    /// Big integer (64-bit).
    BigInt,
    /// Fixed-point decimal with precision and scale.
    Decimal,
    /// Floating point (single precision).
    Real,
    /// Floating point (double precision).
    Double,
    /// Boolean.
    Boolean,
    /// Single bit treated as a zero/one flag.
    Bit,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    Timestamp,
    /// Binary large object.
    Blob,
    /// Array of values.
    Array,
}

/// Type families used by builders and the marshaling layer to decide
/// whether length/scale arguments, quoting, or truncation apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFamily {
    /// Character string types.
    Character,
    /// Exact and approximate numeric types.
    Numeric,
    /// Date/time types.
    Temporal,
    /// Binary types.
    Binary,
    /// Boolean.
    Boolean,
    /// Array.
    Array,
}

impl DataType {
    /// Returns the family this type belongs to.
    #[must_use]
    pub const fn family(self) -> TypeFamily {
        match self {
            Self::Varchar | Self::Char | Self::Nvarchar | Self::Clob => TypeFamily::Character,
            Self::Integer
            | Self::SmallInt
            | Self::TinyInt
            | Self::BigInt
            | Self::Decimal
            | Self::Real
            | Self::Double
            | Self::Bit => TypeFamily::Numeric,
            Self::Date | Self::Time | Self::Timestamp => TypeFamily::Temporal,
            Self::Blob => TypeFamily::Binary,
            Self::Boolean => TypeFamily::Boolean,
            Self::Array => TypeFamily::Array,
        }
    }

    /// Returns `true` if this type belongs to the given family.
    #[must_use]
    pub fn is_kind_of(self, family: TypeFamily) -> bool {
        self.family() == family
    }

    /// Returns the driver-level type code (JDBC-compatible numbering).
    #[must_use]
    pub const fn sql_code(self) -> i32 {
        match self {
            Self::Varchar => 12,
            Self::Char => 1,
            Self::Nvarchar => -9,
            Self::Clob => 2005,
            Self::Integer => 4,
            Self::SmallInt => 5,
            Self::TinyInt => -6,
            Self::BigInt => -5,
            Self::Decimal => 3,
            Self::Real => 7,
            Self::Double => 8,
            Self::Boolean => 16,
            Self::Bit => -7,
            Self::Date => 91,
            Self::Time => 92,
            Self::Timestamp => 93,
            Self::Blob => 2004,
            Self::Array => 2003,
        }
    }

    /// Reverse lookup from a driver-level type code.
    #[must_use]
    pub const fn from_sql_code(code: i32) -> Option<Self> {
        match code {
            12 => Some(Self::Varchar),
            1 => Some(Self::Char),
            -9 => Some(Self::Nvarchar),
            2005 => Some(Self::Clob),
            4 => Some(Self::Integer),
            5 => Some(Self::SmallInt),
            -6 => Some(Self::TinyInt),
            -5 => Some(Self::BigInt),
            3 => Some(Self::Decimal),
            7 => Some(Self::Real),
            8 => Some(Self::Double),
            16 => Some(Self::Boolean),
            -7 => Some(Self::Bit),
            91 => Some(Self::Date),
            92 => Some(Self::Time),
            93 => Some(Self::Timestamp),
            2004 => Some(Self::Blob),
            2003 => Some(Self::Array),
            _ => None,
        }
    }

    /// Returns the canonical (dialect-independent) type name.
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::Varchar => "VARCHAR",
            Self::Char => "CHAR",
            Self::Nvarchar => "NVARCHAR",
            Self::Clob => "CLOB",
            Self::Integer => "INTEGER",
            Self::SmallInt => "SMALLINT",
            Self::TinyInt => "TINYINT",
            Self::BigInt => "BIGINT",
            Self::Decimal => "DECIMAL",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Boolean => "BOOLEAN",
            Self::Bit => "BIT",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Blob => "BLOB",
            Self::Array => "ARRAY",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_membership() {
        assert!(DataType::Varchar.is_kind_of(TypeFamily::Character));
        assert!(DataType::Nvarchar.is_kind_of(TypeFamily::Character));
        assert!(DataType::Decimal.is_kind_of(TypeFamily::Numeric));
        assert!(DataType::Bit.is_kind_of(TypeFamily::Numeric));
        assert!(DataType::Timestamp.is_kind_of(TypeFamily::Temporal));
        assert!(DataType::Blob.is_kind_of(TypeFamily::Binary));
        assert!(!DataType::Boolean.is_kind_of(TypeFamily::Numeric));
    }

    #[test]
    fn sql_code_round_trip() {
        for ty in [
            DataType::Varchar,
            DataType::Char,
            DataType::Nvarchar,
            DataType::Clob,
            DataType::Integer,
            DataType::SmallInt,
            DataType::TinyInt,
            DataType::BigInt,
            DataType::Decimal,
            DataType::Real,
            DataType::Double,
            DataType::Boolean,
            DataType::Bit,
            DataType::Date,
            DataType::Time,
            DataType::Timestamp,
            DataType::Blob,
            DataType::Array,
        ] {
            assert_eq!(DataType::from_sql_code(ty.sql_code()), Some(ty));
        }
    }

    #[test]
    fn unknown_sql_code() {
        assert_eq!(DataType::from_sql_code(9999), None);
    }
}
