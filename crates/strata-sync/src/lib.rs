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

//! Schema reconciliation against a live database.
//!
//! Compares [`strata_core::model::TableModel`] definitions to the
//! catalog exposed by a [`SchemaConnection`] and issues the DDL needed
//! to bring the database in line: create the table, add or drop
//! columns, or drop the table once it is empty.
//!
//! Processors plan before they execute. Incompatible differences such
//! as a column type change are rejected up front, before any statement
//! reaches the database.

pub mod alter;
pub mod connection;
pub mod create;
pub mod drop;
pub mod error;
pub mod options;

pub use alter::{AlterOutcome, AlterProcessor};
pub use connection::{DriverError, LiveColumn, SchemaConnection};
pub use create::CreateProcessor;
pub use drop::{DropOutcome, DropProcessor};
pub use error::{Result, SyncError};
pub use options::SyncOptions;
