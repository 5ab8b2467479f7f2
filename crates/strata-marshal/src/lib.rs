#![allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::option_if_let_else,
    clippy::single_match_else,
    clippy::too_many_lines,
    clippy::use_self
)]

//! Object-relational value marshaling.
//!
//! Moves typed values between in-memory records and database rows,
//! driven by a table model and an explicit field/column mapping. The
//! write path produces statement parameters in model column order; the
//! read path adapts raw driver values to each field's declared kind.
//!
//! Coercions are explicit and lossy-aware: character values longer
//! than the declared column length are truncated with a warning, enum
//! constants encode as ordinal integers or name strings, and numeric
//! narrowing is range-checked. A value that matches no rule is an
//! error, never a silent default.

pub mod error;
pub mod mapping;
pub mod marshaler;
pub mod value;

pub use error::{MarshalError, Result};
pub use mapping::{FieldBinding, Record, RecordMapping};
pub use marshaler::{RowAccess, RowMarshaler, ValueInterceptor};
pub use value::{EnumValue, FieldKind, FieldValue, SqlParam};
