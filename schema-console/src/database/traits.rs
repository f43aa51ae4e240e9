//! Database provider trait
//!
//! This trait defines the primitive reads every backend must provide. Policy
//! (validation, pagination maths, timeouts, partial-failure isolation) lives
//! in [`SchemaConsole`](crate::SchemaConsole), not in the providers.

use crate::identifier::ValidIdentifier;
use crate::schema::{ColumnDescriptor, Row, RowWindow};
use async_trait::async_trait;
use thiserror::Error;

/// Database provider trait for schema discovery and data access
#[async_trait]
pub trait DatabaseProvider: Send + Sync + 'static {
    /// List base table names of the public schema, ordered by name
    async fn list_table_names(&self) -> Result<Vec<String>, DatabaseError>;

    /// Get column metadata for a table, in ordinal order
    ///
    /// The name is only ever bound as a parameter, so catalog names the
    /// identifier allow-list rejects can still be described. An unknown
    /// table yields an empty list.
    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DatabaseError>;

    /// `COUNT(*)` over the whole table
    async fn count_rows(&self, table: &ValidIdentifier) -> Result<u64, DatabaseError>;

    /// Fetch a window of rows from a table
    async fn fetch_rows(
        &self,
        table: &ValidIdentifier,
        window: RowWindow,
    ) -> Result<Vec<Row>, DatabaseError>;

    /// Run an arbitrary SQL string and collect every returned row
    ///
    /// # Security Warning
    ///
    /// No statement-type restriction is applied; INSERT, UPDATE, DELETE and
    /// DDL all run. Authorization is the caller's job.
    async fn run_statement(&self, sql: &str) -> Result<Vec<Row>, DatabaseError>;
}

/// Database error type
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Native database failure, carrying the driver's message
    #[error("Database error: {0}")]
    Query(String),

    /// A row could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DatabaseError {
    /// The message without the "Database error:" prefix
    pub fn native_message(&self) -> &str {
        match self {
            DatabaseError::Query(message) | DatabaseError::Serialization(message) => message,
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(database_error) => {
                DatabaseError::Query(database_error.message().to_string())
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DatabaseError::Serialization(format!("column {index}: {source}"))
            }
            other => DatabaseError::Query(other.to_string()),
        }
    }
}
