//! Explicit field/column mapping.
//!
//! The marshaler never inspects record structure on its own; the
//! caller declares every column-to-field pairing up front, once per
//! table model, and the marshaler follows the declaration.

use std::collections::BTreeMap;

use crate::value::{FieldKind, FieldValue};

/// One column-to-field pairing.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    /// Column name in the table model.
    pub column: String,
    /// Field name in the record.
    pub field: String,
    /// Declared in-memory type of the field.
    pub kind: FieldKind,
    /// Declared constants, in ordinal order, for enum fields.
    pub enum_variants: Option<Vec<String>>,
}

impl FieldBinding {
    /// Creates a binding between a column and a field.
    #[must_use]
    pub fn new(column: impl Into<String>, field: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            column: column.into(),
            field: field.into(),
            kind,
            enum_variants: None,
        }
    }

    /// Declares the enum constants for an enum field, in ordinal order.
    #[must_use]
    pub fn enum_variants(mut self, variants: Vec<String>) -> Self {
        self.enum_variants = Some(variants);
        self
    }
}

/// The complete column/field mapping for one table model.
#[derive(Debug, Clone, Default)]
pub struct RecordMapping {
    bindings: Vec<FieldBinding>,
}

impl RecordMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding.
    #[must_use]
    pub fn bind(mut self, binding: FieldBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Looks up the binding for a column, case-insensitively.
    #[must_use]
    pub fn binding_for_column(&self, column: &str) -> Option<&FieldBinding> {
        self.bindings
            .iter()
            .find(|b| b.column.eq_ignore_ascii_case(column))
    }
}

/// An in-memory record: field name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any existing value.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    /// Fluent variant of [`Record::set`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    /// Reads a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }
}
