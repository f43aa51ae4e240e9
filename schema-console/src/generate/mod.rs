//! Text artifacts derived from the live schema
//!
//! Both generators work on a [`SchemaSnapshot`]: every public table with its
//! columns, read in catalog order.

pub mod context;
pub mod typescript;

pub use context::render_schema_context;
pub use typescript::{render_typescript, to_pascal_case, GeneratedTypes, TypeScriptInterface};

use crate::schema::ColumnDescriptor;

/// One table and its columns, in ordinal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
}

pub type SchemaSnapshot = Vec<TableColumns>;
