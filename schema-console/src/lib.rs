//! # schema-console
//!
//! Schema introspection and dynamic queries over a live database, mountable
//! as an Axum router.
//!
//! ## Features
//!
//! - Runtime discovery of tables and columns
//! - Paginated table browsing
//! - Raw SQL execution with a wall-clock timeout
//! - CSV and JSON exports capped at 10 000 rows
//! - TypeScript interface and Markdown schema generation
//! - Support for PostgreSQL and SQLite
//!
//! ## Security Warning
//!
//! - No authentication/authorization built-in; mount the router behind your
//!   own admin check
//! - Raw query execution allows full database access (INSERT/UPDATE/DELETE)
//! - Table names are checked against `^[A-Za-z_][A-Za-z0-9_]*$` before they
//!   reach any statement
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use schema_console::ConsoleLayer;
//! use sqlx::PgPool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = PgPool::connect("postgres://localhost/app")
//!         .await
//!         .unwrap();
//!
//!     let app: Router = Router::new()
//!         .route("/", get(|| async { "Hello, World!" }))
//!         .merge(ConsoleLayer::postgres("/console", pool).into_router());
//!
//!     // Serve the application...
//! }
//! ```

// Public modules
pub mod api;
pub mod console;
pub mod database;
pub mod export;
pub mod generate;
pub mod identifier;
pub mod layer;
pub mod options;
pub mod schema;
pub mod type_mapping;

// Public exports
pub use console::SchemaConsole;
pub use export::{ExportFormat, ExportResult};
pub use identifier::{validate, ValidIdentifier};
pub use layer::ConsoleLayer;
pub use options::ConsoleOptions;
pub use schema::{AdHocQueryResult, ColumnDescriptor, QueryFailure, TableDescriptor, TablePage};
pub use type_mapping::{map_type, TypeExpression};

// Re-export database providers
pub use database::traits::{DatabaseError, DatabaseProvider};

#[cfg(feature = "sqlite")]
pub use database::sqlite::SqliteProvider;

#[cfg(feature = "postgres")]
pub use database::postgres::PostgresProvider;

// Error type
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error(
        "Invalid pagination: page {page}, page size {page_size} (page must be at least 1, page size between 1 and {max})",
        max = crate::schema::MAX_PAGE_SIZE
    )]
    InvalidPagination { page: u64, page_size: u64 },

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
