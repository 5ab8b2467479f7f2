#![allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::option_if_let_else,
    clippy::significant_drop_tightening,
    clippy::single_match_else,
    clippy::struct_excessive_bools,
    clippy::too_many_lines,
    clippy::use_self
)]

//! # strata-core
//!
//! Cross-dialect SQL generation: a declarative table model, an abstract
//! column type registry, dialect strategies for heterogeneous backends,
//! and single-use statement builders.
//!
//! ```rust
//! use strata_core::builder::CreateTableBuilder;
//! use strata_core::dialect::DialectRegistry;
//! use strata_core::model::{ColumnModel, TableModel};
//! use strata_core::types::DataType;
//!
//! let registry = DialectRegistry::with_defaults();
//! let dialect = registry.by_product_name("ansi").unwrap();
//!
//! let person = TableModel::new("Person")
//!     .column(ColumnModel::new("id", DataType::Integer).primary_key().identity())
//!     .column(ColumnModel::new("name", DataType::Varchar).length(50).not_null());
//!
//! let sql = CreateTableBuilder::from_model(dialect.as_ref(), &person)
//!     .build()
//!     .unwrap();
//! assert!(sql.starts_with("CREATE TABLE Person"));
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod model;
pub mod types;

pub use builder::{split_statements, ParamSlot, Statement, STATEMENT_DELIMITER};
pub use dialect::{AnsiDialect, ColumnarDialect, DatabaseSystem, Dialect, DialectRegistry, NativeType};
pub use error::CoreError;
pub use model::{
    ColumnModel, ConstraintsModel, EnumEncoding, ForeignKeyModel, IndexModel, SortOrder, TableModel,
};
pub use types::{DataType, TypeFamily};
