//! The bidirectional row marshaler.
//!
//! Write path: record fields become statement parameters in model
//! column order, identity columns skipped. Read path: raw driver
//! values become record fields, adapted to each field's declared kind.
//! Every coercion is explicit; a value that fits no rule is an error,
//! never a silent default.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tracing::warn;

use strata_core::model::{ColumnModel, EnumEncoding, TableModel};
use strata_core::types::{DataType, TypeFamily};

use crate::error::{MarshalError, Result};
use crate::mapping::{Record, RecordMapping};
use crate::value::{EnumValue, FieldKind, FieldValue, SqlParam};

/// A driver row the read path can pull column values from.
pub trait RowAccess {
    /// Returns the raw value for a column, or `None` when the row does
    /// not carry the column (treated as NULL).
    fn value(&self, column: &str) -> Option<SqlParam>;
}

/// Hook invoked around every value crossing the boundary, for
/// cross-cutting value policies.
pub trait ValueInterceptor {
    /// Rewrites a value immediately before it is bound.
    fn before_write(&self, column: &ColumnModel, value: FieldValue) -> FieldValue {
        let _ = column;
        value
    }

    /// Rewrites a value after it is read, before record assignment.
    fn after_read(&self, column: &ColumnModel, value: FieldValue) -> FieldValue {
        let _ = column;
        value
    }
}

/// Moves values between records and rows for one table model.
pub struct RowMarshaler {
    mapping: RecordMapping,
    interceptor: Option<Box<dyn ValueInterceptor>>,
}

impl RowMarshaler {
    /// Creates a marshaler over the given mapping.
    #[must_use]
    pub fn new(mapping: RecordMapping) -> Self {
        Self {
            mapping,
            interceptor: None,
        }
    }

    /// Installs a value interceptor.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl ValueInterceptor + 'static) -> Self {
        self.interceptor = Some(Box::new(interceptor));
        self
    }

    /// Binds the record's fields as parameters in model column order,
    /// skipping identity columns.
    pub fn write_parameters(&self, model: &TableModel, record: &Record) -> Result<Vec<SqlParam>> {
        let mut params = Vec::new();
        for column in &model.columns {
            if column.identity {
                continue;
            }
            let binding = self
                .mapping
                .binding_for_column(&column.name)
                .ok_or_else(|| MarshalError::MissingField(column.name.clone()))?;
            // A field absent from the record binds as NULL; an absent
            // mapping is the caller's bug and errors above.
            let value = record
                .get(&binding.field)
                .cloned()
                .unwrap_or(FieldValue::Null);
            let value = encode_enum(column, value);
            let value = truncate_oversized(column, value);
            let value = match &self.interceptor {
                Some(hook) => hook.before_write(column, value),
                None => value,
            };
            params.push(bind(column, value)?);
        }
        Ok(params)
    }

    /// Reads every modeled column from the row into a record, adapting
    /// each raw value to its field's declared kind.
    pub fn read_record(&self, model: &TableModel, row: &dyn RowAccess) -> Result<Record> {
        let mut record = Record::new();
        for column in &model.columns {
            let binding = self
                .mapping
                .binding_for_column(&column.name)
                .ok_or_else(|| MarshalError::MissingField(column.name.clone()))?;
            let raw = row.value(&column.name).unwrap_or(SqlParam::Null);
            let value = adapt(column, binding.kind, binding.enum_variants.as_deref(), raw)?;
            let value = match &self.interceptor {
                Some(hook) => hook.after_read(column, value),
                None => value,
            };
            record.set(binding.field.clone(), value);
        }
        Ok(record)
    }

    /// Binds an id value using the first primary-key column's type,
    /// for key-only lookups and updates.
    pub fn write_primary_key(&self, model: &TableModel, id: FieldValue) -> Result<SqlParam> {
        let column = model
            .primary_key_column()
            .ok_or_else(|| MarshalError::MissingPrimaryKey(model.name.clone()))?;
        bind(column, id)
    }

}

/// Applies the column's enum encoding ([`EnumEncoding::Ordinal`] when
/// the column declares none) to an enum field value; all other values
/// pass through.
fn encode_enum(column: &ColumnModel, value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Enum(constant) => match column.enum_encoding.unwrap_or_default() {
            EnumEncoding::Ordinal => FieldValue::I32(constant.ordinal),
            EnumEncoding::Name => FieldValue::Text(constant.name),
        },
        other => other,
    }
}

fn truncate_oversized(column: &ColumnModel, value: FieldValue) -> FieldValue {
    if !column.data_type.is_kind_of(TypeFamily::Character) {
        return value;
    }
    let Some(length) = column.length else {
        return value;
    };
    let limit = usize::try_from(length).unwrap_or(usize::MAX);
    match value {
        FieldValue::Text(text) if text.chars().count() > limit => {
            let keep = limit.saturating_sub(1);
            let truncated: String = text.chars().take(keep).collect();
            warn!(
                column = %column.name,
                length,
                kept = keep,
                "truncating oversized character value"
            );
            FieldValue::Text(truncated)
        }
        other => other,
    }
}

/// Binds one field value for a column's abstract type.
fn bind(column: &ColumnModel, value: FieldValue) -> Result<SqlParam> {
    if matches!(value, FieldValue::Null) {
        return Ok(SqlParam::Null);
    }
    match (column.data_type, value) {
        (DataType::Varchar | DataType::Char | DataType::Nvarchar | DataType::Clob, value) => {
            match value {
                FieldValue::Text(s) => Ok(SqlParam::Text(s)),
                FieldValue::Char(c) => Ok(SqlParam::Text(c.to_string())),
                other => Err(unsupported(column, &other)),
            }
        }
        (DataType::Date, FieldValue::Date(d)) => Ok(SqlParam::Date(d)),
        (DataType::Time, FieldValue::Time(t)) => Ok(SqlParam::Time(t)),
        (DataType::Timestamp, FieldValue::Timestamp(ts)) => Ok(SqlParam::Timestamp(ts)),
        (DataType::Integer, FieldValue::I32(v)) => Ok(SqlParam::I32(v)),
        (DataType::SmallInt, FieldValue::I16(v)) => Ok(SqlParam::I16(v)),
        (DataType::TinyInt, FieldValue::I8(v)) => Ok(SqlParam::I8(v)),
        (DataType::BigInt, FieldValue::I64(v)) => Ok(SqlParam::I64(v)),
        (DataType::BigInt, FieldValue::Decimal(d)) => {
            // Arbitrary precision is accepted only when exactly
            // representable as a 64-bit integer.
            if d.is_integer() {
                if let Some(v) = d.to_i64() {
                    return Ok(SqlParam::I64(v));
                }
            }
            Err(MarshalError::InvalidCoercion {
                column: column.name.clone(),
                reason: format!("{d} is not exactly representable as a 64-bit integer"),
            })
        }
        (DataType::Real, FieldValue::F32(v)) => Ok(SqlParam::F32(v)),
        (DataType::Double, FieldValue::F64(v)) => Ok(SqlParam::F64(v)),
        (DataType::Double, FieldValue::F32(v)) => Ok(SqlParam::F64(f64::from(v))),
        (DataType::Boolean, FieldValue::Bool(v)) => Ok(SqlParam::Bool(v)),
        (DataType::Decimal, FieldValue::Decimal(d)) => Ok(SqlParam::Decimal(d)),
        (DataType::Decimal, FieldValue::F64(v)) => {
            Decimal::from_f64(v)
                .map(SqlParam::Decimal)
                .ok_or_else(|| MarshalError::InvalidCoercion {
                    column: column.name.clone(),
                    reason: format!("{v} has no decimal representation"),
                })
        }
        (DataType::Blob, FieldValue::Bytes(bytes)) => Ok(SqlParam::Bytes(bytes)),
        (DataType::Bit, value) => bind_bit(column, value),
        (DataType::Array, FieldValue::Array(items)) => {
            let bound = items
                .into_iter()
                .map(|item| element_param(column, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(SqlParam::Array(bound))
        }
        (_, other) => Err(unsupported(column, &other)),
    }
}

/// Bit columns carry a zero-or-one flag and accept boolean, byte, or
/// integer representations of it.
fn bind_bit(column: &ColumnModel, value: FieldValue) -> Result<SqlParam> {
    let flag = match value {
        FieldValue::Bool(b) => i64::from(b),
        FieldValue::I8(v) => i64::from(v),
        FieldValue::I16(v) => i64::from(v),
        FieldValue::I32(v) => i64::from(v),
        FieldValue::I64(v) => v,
        other => return Err(unsupported(column, &other)),
    };
    match flag {
        0 => Ok(SqlParam::I8(0)),
        1 => Ok(SqlParam::I8(1)),
        other => Err(MarshalError::InvalidCoercion {
            column: column.name.clone(),
            reason: format!("{other} is not a zero-or-one flag"),
        }),
    }
}

/// Passthrough binding for array elements. Scalars map kind-for-kind;
/// nested arrays recurse.
fn element_param(column: &ColumnModel, value: FieldValue) -> Result<SqlParam> {
    match value {
        FieldValue::Null => Ok(SqlParam::Null),
        FieldValue::Bool(v) => Ok(SqlParam::Bool(v)),
        FieldValue::I8(v) => Ok(SqlParam::I8(v)),
        FieldValue::I16(v) => Ok(SqlParam::I16(v)),
        FieldValue::I32(v) => Ok(SqlParam::I32(v)),
        FieldValue::I64(v) => Ok(SqlParam::I64(v)),
        FieldValue::F32(v) => Ok(SqlParam::F32(v)),
        FieldValue::F64(v) => Ok(SqlParam::F64(v)),
        FieldValue::Decimal(d) => Ok(SqlParam::Decimal(d)),
        FieldValue::Text(s) => Ok(SqlParam::Text(s)),
        FieldValue::Char(c) => Ok(SqlParam::Text(c.to_string())),
        FieldValue::Bytes(b) => Ok(SqlParam::Bytes(b)),
        FieldValue::Date(d) => Ok(SqlParam::Date(d)),
        FieldValue::Time(t) => Ok(SqlParam::Time(t)),
        FieldValue::Timestamp(ts) => Ok(SqlParam::Timestamp(ts)),
        FieldValue::Array(items) => {
            let bound = items
                .into_iter()
                .map(|item| element_param(column, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(SqlParam::Array(bound))
        }
        other @ FieldValue::Enum(_) => Err(unsupported(column, &other)),
    }
}

/// Adapts one raw driver value to the field's declared kind, applying
/// in fixed order: enum decoding, numeric narrowing/widening, blob
/// materialization.
#[allow(clippy::cast_possible_truncation)] // f64 -> f32 narrowing is the documented adaptation
fn adapt(
    column: &ColumnModel,
    kind: FieldKind,
    enum_variants: Option<&[String]>,
    raw: SqlParam,
) -> Result<FieldValue> {
    if matches!(raw, SqlParam::Null) {
        return Ok(FieldValue::Null);
    }
    match kind {
        FieldKind::Enum => decode_enum(column, enum_variants, raw),
        FieldKind::Bool => adapt_bool(column, raw),
        FieldKind::I8 | FieldKind::I16 | FieldKind::I32 | FieldKind::I64 => {
            adapt_integer(column, kind, raw)
        }
        FieldKind::F32 => match raw {
            SqlParam::F32(v) => Ok(FieldValue::F32(v)),
            SqlParam::F64(v) => Ok(FieldValue::F32(v as f32)),
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::F64 => match raw {
            SqlParam::F64(v) => Ok(FieldValue::F64(v)),
            SqlParam::F32(v) => Ok(FieldValue::F64(f64::from(v))),
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::Decimal => match raw {
            SqlParam::Decimal(d) => Ok(FieldValue::Decimal(d)),
            SqlParam::I64(v) => Ok(FieldValue::Decimal(Decimal::from(v))),
            SqlParam::I32(v) => Ok(FieldValue::Decimal(Decimal::from(v))),
            SqlParam::F64(v) => Decimal::from_f64(v)
                .map(FieldValue::Decimal)
                .ok_or_else(|| coercion(column, kind, &SqlParam::F64(v))),
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::Text => match raw {
            SqlParam::Text(s) => Ok(FieldValue::Text(s)),
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::Char => match raw {
            SqlParam::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(FieldValue::Char(c)),
                    _ => Err(MarshalError::InvalidCoercion {
                        column: column.name.clone(),
                        reason: format!(
                            "string of {} chars cannot fill a single-character field",
                            s.chars().count()
                        ),
                    }),
                }
            }
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::Bytes => match raw {
            SqlParam::Bytes(b) => Ok(FieldValue::Bytes(b)),
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::Date => match raw {
            SqlParam::Date(d) => Ok(FieldValue::Date(d)),
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::Time => match raw {
            SqlParam::Time(t) => Ok(FieldValue::Time(t)),
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::Timestamp => match raw {
            SqlParam::Timestamp(ts) => Ok(FieldValue::Timestamp(ts)),
            other => Err(coercion(column, kind, &other)),
        },
        FieldKind::Array => match raw {
            SqlParam::Array(items) => {
                let values = items
                    .into_iter()
                    .map(|item| element_value(column, item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(FieldValue::Array(values))
            }
            other => Err(coercion(column, kind, &other)),
        },
    }
}

fn decode_enum(
    column: &ColumnModel,
    enum_variants: Option<&[String]>,
    raw: SqlParam,
) -> Result<FieldValue> {
    let variants = enum_variants.ok_or_else(|| MarshalError::InvalidCoercion {
        column: column.name.clone(),
        reason: "enum field without declared constants".into(),
    })?;
    match raw {
        SqlParam::I8(_) | SqlParam::I16(_) | SqlParam::I32(_) | SqlParam::I64(_) => {
            let ordinal = integer_value(&raw)
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| MarshalError::InvalidCoercion {
                    column: column.name.clone(),
                    reason: "enum ordinal is not a 32-bit integer".into(),
                })?;
            let name = usize::try_from(ordinal)
                .ok()
                .and_then(|i| variants.get(i))
                .ok_or_else(|| MarshalError::InvalidCoercion {
                    column: column.name.clone(),
                    reason: format!("ordinal {ordinal} is outside the declared constants"),
                })?;
            Ok(FieldValue::Enum(EnumValue::new(ordinal, name.clone())))
        }
        SqlParam::Text(s) => {
            let position = variants.iter().position(|v| v == &s).ok_or_else(|| {
                MarshalError::InvalidCoercion {
                    column: column.name.clone(),
                    reason: format!("'{s}' is not a declared constant"),
                }
            })?;
            let ordinal =
                i32::try_from(position).map_err(|_| MarshalError::InvalidCoercion {
                    column: column.name.clone(),
                    reason: format!("constant position {position} overflows an ordinal"),
                })?;
            Ok(FieldValue::Enum(EnumValue::new(ordinal, s)))
        }
        other => Err(coercion(column, FieldKind::Enum, &other)),
    }
}

fn adapt_bool(column: &ColumnModel, raw: SqlParam) -> Result<FieldValue> {
    match raw {
        SqlParam::Bool(b) => Ok(FieldValue::Bool(b)),
        ref numeric @ (SqlParam::I8(_)
        | SqlParam::I16(_)
        | SqlParam::I32(_)
        | SqlParam::I64(_)) => {
            // Boolean-like numerics widen to bool; anything past 0/1
            // is not a flag.
            match integer_value(numeric) {
                Some(0) => Ok(FieldValue::Bool(false)),
                Some(1) => Ok(FieldValue::Bool(true)),
                _ => Err(MarshalError::InvalidCoercion {
                    column: column.name.clone(),
                    reason: "numeric value is not a zero-or-one flag".into(),
                }),
            }
        }
        other => Err(coercion(column, FieldKind::Bool, &other)),
    }
}

fn adapt_integer(column: &ColumnModel, kind: FieldKind, raw: SqlParam) -> Result<FieldValue> {
    let wide = match &raw {
        SqlParam::Decimal(d) if d.is_integer() => d.to_i64(),
        other => integer_value(other),
    };
    let Some(wide) = wide else {
        return Err(coercion(column, kind, &raw));
    };
    let out_of_range = |target: &str| MarshalError::InvalidCoercion {
        column: column.name.clone(),
        reason: format!("{wide} does not fit in {target}"),
    };
    match kind {
        FieldKind::I8 => i8::try_from(wide)
            .map(FieldValue::I8)
            .map_err(|_| out_of_range("an 8-bit integer")),
        FieldKind::I16 => i16::try_from(wide)
            .map(FieldValue::I16)
            .map_err(|_| out_of_range("a 16-bit integer")),
        FieldKind::I32 => i32::try_from(wide)
            .map(FieldValue::I32)
            .map_err(|_| out_of_range("a 32-bit integer")),
        FieldKind::I64 => Ok(FieldValue::I64(wide)),
        _ => Err(coercion(column, kind, &raw)),
    }
}

/// Passthrough for array elements read back from the driver.
fn element_value(column: &ColumnModel, param: SqlParam) -> Result<FieldValue> {
    match param {
        SqlParam::Null => Ok(FieldValue::Null),
        SqlParam::Bool(v) => Ok(FieldValue::Bool(v)),
        SqlParam::I8(v) => Ok(FieldValue::I8(v)),
        SqlParam::I16(v) => Ok(FieldValue::I16(v)),
        SqlParam::I32(v) => Ok(FieldValue::I32(v)),
        SqlParam::I64(v) => Ok(FieldValue::I64(v)),
        SqlParam::F32(v) => Ok(FieldValue::F32(v)),
        SqlParam::F64(v) => Ok(FieldValue::F64(v)),
        SqlParam::Decimal(d) => Ok(FieldValue::Decimal(d)),
        SqlParam::Text(s) => Ok(FieldValue::Text(s)),
        SqlParam::Bytes(b) => Ok(FieldValue::Bytes(b)),
        SqlParam::Date(d) => Ok(FieldValue::Date(d)),
        SqlParam::Time(t) => Ok(FieldValue::Time(t)),
        SqlParam::Timestamp(ts) => Ok(FieldValue::Timestamp(ts)),
        SqlParam::Array(items) => {
            let values = items
                .into_iter()
                .map(|item| element_value(column, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(FieldValue::Array(values))
        }
    }
}

fn integer_value(param: &SqlParam) -> Option<i64> {
    match param {
        SqlParam::I8(v) => Some(i64::from(*v)),
        SqlParam::I16(v) => Some(i64::from(*v)),
        SqlParam::I32(v) => Some(i64::from(*v)),
        SqlParam::I64(v) => Some(*v),
        _ => None,
    }
}

fn unsupported(column: &ColumnModel, value: &FieldValue) -> MarshalError {
    MarshalError::UnsupportedType {
        column: column.name.clone(),
        data_type: column.data_type,
        value: value.kind_name().to_string(),
    }
}

fn coercion(column: &ColumnModel, kind: FieldKind, raw: &SqlParam) -> MarshalError {
    MarshalError::InvalidCoercion {
        column: column.name.clone(),
        reason: format!("driver value {} does not adapt to {kind:?}", raw.kind_name()),
    }
}
