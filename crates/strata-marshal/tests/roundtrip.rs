//! Write-then-read scenarios over an in-memory row.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use strata_core::model::{ColumnModel, EnumEncoding, TableModel};
use strata_core::types::DataType;
use strata_marshal::{
    EnumValue, FieldBinding, FieldKind, FieldValue, MarshalError, Record, RecordMapping,
    RowAccess, RowMarshaler, SqlParam,
};

/// Row double: column name to raw driver value.
struct MapRow(HashMap<String, SqlParam>);

impl MapRow {
    fn from_columns(model: &TableModel, params: &[SqlParam]) -> Self {
        // Parameters come back in model column order with identity
        // columns skipped, mirroring an insert-then-select cycle.
        let mut values = HashMap::new();
        let mut params = params.iter();
        for column in &model.columns {
            if column.identity {
                continue;
            }
            if let Some(param) = params.next() {
                values.insert(column.name.clone(), param.clone());
            }
        }
        Self(values)
    }
}

impl RowAccess for MapRow {
    fn value(&self, column: &str) -> Option<SqlParam> {
        self.0.get(column).cloned()
    }
}

fn item_model() -> TableModel {
    TableModel::new("Item")
        .column(
            ColumnModel::new("id", DataType::Integer)
                .primary_key()
                .identity(),
        )
        .column(ColumnModel::new("label", DataType::Varchar).length(50))
        .column(ColumnModel::new("grade", DataType::Char).length(1))
        .column(ColumnModel::new("quantity", DataType::Integer))
        .column(ColumnModel::new("weight", DataType::SmallInt))
        .column(ColumnModel::new("total", DataType::BigInt))
        .column(ColumnModel::new("price", DataType::Decimal).length(10).scale(2))
        .column(ColumnModel::new("ratio", DataType::Double))
        .column(ColumnModel::new("active", DataType::Boolean))
        .column(ColumnModel::new("payload", DataType::Blob))
        .column(ColumnModel::new("shipped_on", DataType::Date))
        .column(ColumnModel::new("shipped_at", DataType::Time))
        .column(ColumnModel::new("updated", DataType::Timestamp))
}

fn item_mapping() -> RecordMapping {
    RecordMapping::new()
        .bind(FieldBinding::new("id", "id", FieldKind::I32))
        .bind(FieldBinding::new("label", "label", FieldKind::Text))
        .bind(FieldBinding::new("grade", "grade", FieldKind::Char))
        .bind(FieldBinding::new("quantity", "quantity", FieldKind::I32))
        .bind(FieldBinding::new("weight", "weight", FieldKind::I16))
        .bind(FieldBinding::new("total", "total", FieldKind::I64))
        .bind(FieldBinding::new("price", "price", FieldKind::Decimal))
        .bind(FieldBinding::new("ratio", "ratio", FieldKind::F64))
        .bind(FieldBinding::new("active", "active", FieldKind::Bool))
        .bind(FieldBinding::new("payload", "payload", FieldKind::Bytes))
        .bind(FieldBinding::new("shipped_on", "shippedOn", FieldKind::Date))
        .bind(FieldBinding::new("shipped_at", "shippedAt", FieldKind::Time))
        .bind(FieldBinding::new("updated", "updated", FieldKind::Timestamp))
}

fn item_record() -> Record {
    Record::new()
        .with("label", FieldValue::Text("widget".into()))
        .with("grade", FieldValue::Char('A'))
        .with("quantity", FieldValue::I32(7))
        .with("weight", FieldValue::I16(120))
        .with("total", FieldValue::I64(9_000_000_000))
        .with("price", FieldValue::Decimal(Decimal::new(1999, 2)))
        .with("ratio", FieldValue::F64(0.25))
        .with("active", FieldValue::Bool(true))
        .with("payload", FieldValue::Bytes(vec![0xDE, 0xAD]))
        .with(
            "shippedOn",
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
        )
        .with(
            "shippedAt",
            FieldValue::Time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
        )
        .with(
            "updated",
            FieldValue::Timestamp(NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            )),
        )
}

#[test]
fn every_supported_type_survives_a_round_trip() {
    let model = item_model();
    let marshaler = RowMarshaler::new(item_mapping());
    let record = item_record();

    let params = marshaler.write_parameters(&model, &record).unwrap();
    // One parameter per non-identity column.
    assert_eq!(params.len(), model.columns.len() - 1);

    let row = MapRow::from_columns(&model, &params);
    let read = marshaler.read_record(&model, &row).unwrap();

    assert_eq!(read.get("label"), record.get("label"));
    assert_eq!(read.get("grade"), record.get("grade"));
    assert_eq!(read.get("quantity"), record.get("quantity"));
    assert_eq!(read.get("weight"), record.get("weight"));
    assert_eq!(read.get("total"), record.get("total"));
    assert_eq!(read.get("price"), record.get("price"));
    assert_eq!(read.get("ratio"), record.get("ratio"));
    assert_eq!(read.get("active"), record.get("active"));
    assert_eq!(read.get("payload"), record.get("payload"));
    assert_eq!(read.get("shippedOn"), record.get("shippedOn"));
    assert_eq!(read.get("shippedAt"), record.get("shippedAt"));
    assert_eq!(read.get("updated"), record.get("updated"));
    // The identity column was never written; it reads back as NULL.
    assert_eq!(read.get("id"), Some(&FieldValue::Null));
}

#[test]
fn bit_tinyint_real_and_array_survive_a_round_trip() {
    let model = TableModel::new("Sensor")
        .column(ColumnModel::new("enabled", DataType::Bit))
        .column(ColumnModel::new("level", DataType::TinyInt))
        .column(ColumnModel::new("gain", DataType::Real))
        .column(ColumnModel::new("samples", DataType::Array));
    let mapping = RecordMapping::new()
        .bind(FieldBinding::new("enabled", "enabled", FieldKind::Bool))
        .bind(FieldBinding::new("level", "level", FieldKind::I8))
        .bind(FieldBinding::new("gain", "gain", FieldKind::F32))
        .bind(FieldBinding::new("samples", "samples", FieldKind::Array));
    let marshaler = RowMarshaler::new(mapping);

    let record = Record::new()
        .with("enabled", FieldValue::Bool(true))
        .with("level", FieldValue::I8(5))
        .with("gain", FieldValue::F32(0.5))
        .with(
            "samples",
            FieldValue::Array(vec![FieldValue::I32(1), FieldValue::I32(2)]),
        );

    let params = marshaler.write_parameters(&model, &record).unwrap();
    assert_eq!(
        params,
        [
            SqlParam::I8(1),
            SqlParam::I8(5),
            SqlParam::F32(0.5),
            SqlParam::Array(vec![SqlParam::I32(1), SqlParam::I32(2)]),
        ]
    );

    let row = MapRow::from_columns(&model, &params);
    let read = marshaler.read_record(&model, &row).unwrap();
    // The bit flag widens back to bool; everything else is identity.
    assert_eq!(read.get("enabled"), Some(&FieldValue::Bool(true)));
    assert_eq!(read.get("level"), record.get("level"));
    assert_eq!(read.get("gain"), record.get("gain"));
    assert_eq!(read.get("samples"), record.get("samples"));
}

#[test]
fn oversized_varchar_truncates_to_length_minus_one() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let model = TableModel::new("Note")
        .column(ColumnModel::new("body", DataType::Varchar).length(50));
    let mapping =
        RecordMapping::new().bind(FieldBinding::new("body", "body", FieldKind::Text));
    let marshaler = RowMarshaler::new(mapping);

    let record = Record::new().with("body", FieldValue::Text("x".repeat(60)));
    let params = marshaler.write_parameters(&model, &record).unwrap();

    match &params[0] {
        SqlParam::Text(text) => assert_eq!(text.len(), 49),
        other => panic!("expected text parameter, got {other:?}"),
    }
}

#[test]
fn ordinal_enum_third_constant_marshals_as_two() {
    let model = TableModel::new("Ticket").column(
        ColumnModel::new("status", DataType::Integer).enum_encoding(EnumEncoding::Ordinal),
    );
    let variants = vec!["OPEN".to_string(), "CLOSED".to_string(), "ARCHIVED".to_string()];
    let mapping = RecordMapping::new().bind(
        FieldBinding::new("status", "status", FieldKind::Enum).enum_variants(variants),
    );
    let marshaler = RowMarshaler::new(mapping);

    let record = Record::new().with("status", FieldValue::Enum(EnumValue::new(2, "ARCHIVED")));
    let params = marshaler.write_parameters(&model, &record).unwrap();
    assert_eq!(params, [SqlParam::I32(2)]);

    let row = MapRow::from_columns(&model, &params);
    let read = marshaler.read_record(&model, &row).unwrap();
    assert_eq!(
        read.get("status"),
        Some(&FieldValue::Enum(EnumValue::new(2, "ARCHIVED")))
    );
}

#[test]
fn name_enum_encodes_the_constant_name() {
    let model = TableModel::new("Ticket").column(
        ColumnModel::new("status", DataType::Varchar)
            .length(20)
            .enum_encoding(EnumEncoding::Name),
    );
    let variants = vec!["OPEN".to_string(), "CLOSED".to_string()];
    let mapping = RecordMapping::new().bind(
        FieldBinding::new("status", "status", FieldKind::Enum).enum_variants(variants),
    );
    let marshaler = RowMarshaler::new(mapping);

    let record = Record::new().with("status", FieldValue::Enum(EnumValue::new(1, "CLOSED")));
    let params = marshaler.write_parameters(&model, &record).unwrap();
    assert_eq!(params, [SqlParam::Text("CLOSED".into())]);

    let row = MapRow::from_columns(&model, &params);
    let read = marshaler.read_record(&model, &row).unwrap();
    assert_eq!(
        read.get("status"),
        Some(&FieldValue::Enum(EnumValue::new(1, "CLOSED")))
    );
}

#[test]
fn missing_record_field_binds_null() {
    let model = TableModel::new("Note")
        .column(ColumnModel::new("body", DataType::Varchar).length(50));
    let mapping =
        RecordMapping::new().bind(FieldBinding::new("body", "body", FieldKind::Text));
    let marshaler = RowMarshaler::new(mapping);

    let params = marshaler.write_parameters(&model, &Record::new()).unwrap();
    assert_eq!(params, [SqlParam::Null]);
}

#[test]
fn unmapped_column_is_an_error() {
    let model = TableModel::new("Note")
        .column(ColumnModel::new("body", DataType::Varchar).length(50));
    let marshaler = RowMarshaler::new(RecordMapping::new());

    let err = marshaler
        .write_parameters(&model, &Record::new())
        .unwrap_err();
    assert!(matches!(err, MarshalError::MissingField(column) if column == "body"));
}

#[test]
fn primary_key_binds_by_the_key_column_type() {
    let model = TableModel::new("Item")
        .column(ColumnModel::new("id", DataType::BigInt).primary_key())
        .column(ColumnModel::new("label", DataType::Varchar).length(50));
    let marshaler = RowMarshaler::new(item_mapping());

    let param = marshaler
        .write_primary_key(&model, FieldValue::I64(41))
        .unwrap();
    assert_eq!(param, SqlParam::I64(41));

    let keyless =
        TableModel::new("Log").column(ColumnModel::new("line", DataType::Varchar).length(200));
    let err = marshaler
        .write_primary_key(&keyless, FieldValue::I64(1))
        .unwrap_err();
    assert!(matches!(err, MarshalError::MissingPrimaryKey(table) if table == "Log"));
}

#[test]
fn interceptor_rewrites_values_around_the_boundary() {
    struct Redactor;

    impl strata_marshal::ValueInterceptor for Redactor {
        fn before_write(&self, column: &ColumnModel, value: FieldValue) -> FieldValue {
            if column.name == "secret" {
                FieldValue::Text("***".into())
            } else {
                value
            }
        }
    }

    let model = TableModel::new("Vault")
        .column(ColumnModel::new("secret", DataType::Varchar).length(50));
    let mapping =
        RecordMapping::new().bind(FieldBinding::new("secret", "secret", FieldKind::Text));
    let marshaler = RowMarshaler::new(mapping).with_interceptor(Redactor);

    let record = Record::new().with("secret", FieldValue::Text("hunter2".into()));
    let params = marshaler.write_parameters(&model, &record).unwrap();
    assert_eq!(params, [SqlParam::Text("***".into())]);
}
