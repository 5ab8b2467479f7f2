//! Value representations on both sides of the marshaling boundary.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// A value bound to a statement parameter, as the driver sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// SQL NULL.
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
    Text(String),
    /// Binary stream of known length.
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// Elementwise-bound array.
    Array(Vec<SqlParam>),
}

impl SqlParam {
    /// Short kind name for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            SqlParam::Null => "null",
            SqlParam::Bool(_) => "bool",
            SqlParam::I8(_) => "i8",
            SqlParam::I16(_) => "i16",
            SqlParam::I32(_) => "i32",
            SqlParam::I64(_) => "i64",
            SqlParam::F32(_) => "f32",
            SqlParam::F64(_) => "f64",
            SqlParam::Decimal(_) => "decimal",
            SqlParam::Text(_) => "text",
            SqlParam::Bytes(_) => "bytes",
            SqlParam::Date(_) => "date",
            SqlParam::Time(_) => "time",
            SqlParam::Timestamp(_) => "timestamp",
            SqlParam::Array(_) => "array",
        }
    }
}

/// One constant of an enumerated field: its declaration position and
/// its name. Which of the two reaches the database is decided by the
/// column's enum encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Zero-based declaration position.
    pub ordinal: i32,
    /// Constant name.
    pub name: String,
}

impl EnumValue {
    /// Creates an enum constant value.
    #[must_use]
    pub fn new(ordinal: i32, name: impl Into<String>) -> Self {
        Self {
            ordinal,
            name: name.into(),
        }
    }
}

/// An in-memory field value held by a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Text(String),
    Char(char),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Enum(EnumValue),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Short kind name for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::I8(_) => "i8",
            FieldValue::I16(_) => "i16",
            FieldValue::I32(_) => "i32",
            FieldValue::I64(_) => "i64",
            FieldValue::F32(_) => "f32",
            FieldValue::F64(_) => "f64",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Text(_) => "text",
            FieldValue::Char(_) => "char",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Date(_) => "date",
            FieldValue::Time(_) => "time",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Enum(_) => "enum",
            FieldValue::Array(_) => "array",
        }
    }
}

/// The declared in-memory type of a mapped field, driving read-path
/// narrowing and widening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    Text,
    Char,
    Bytes,
    Date,
    Time,
    Timestamp,
    Enum,
    Array,
}
