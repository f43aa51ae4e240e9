//! ConsoleLayer - Main Axum integration layer
//!
//! This module provides the entry point for mounting the console API into an
//! Axum application.

use crate::api::create_api_router;
use crate::console::SchemaConsole;
use crate::database::traits::DatabaseProvider;
use crate::options::ConsoleOptions;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[cfg(feature = "sqlite")]
use crate::database::sqlite::SqliteProvider;

#[cfg(feature = "postgres")]
use crate::database::postgres::PostgresProvider;

/// Main layer for mounting the console into an Axum application
///
/// # Example
///
/// ```rust,no_run
/// use axum::Router;
/// use schema_console::ConsoleLayer;
/// use sqlx::PgPool;
///
/// # async fn example() {
/// let pool = PgPool::connect("postgres://localhost/app").await.unwrap();
/// let console = ConsoleLayer::postgres("/console", pool);
/// let app: Router = Router::new().merge(console.into_router());
/// # }
/// ```
pub struct ConsoleLayer<DB: DatabaseProvider> {
    base_path: String,
    console: Arc<SchemaConsole<DB>>,
}

impl<DB: DatabaseProvider> ConsoleLayer<DB> {
    /// Create a new console at the given base path
    ///
    /// # Arguments
    ///
    /// * `base_path` - The URL path where the API will be mounted (e.g., "/console")
    /// * `database` - The database provider implementation
    pub fn new(base_path: impl Into<String>, database: DB) -> Self {
        Self::with_options(base_path, database, ConsoleOptions::default())
    }

    pub fn with_options(base_path: impl Into<String>, database: DB, options: ConsoleOptions) -> Self {
        Self {
            base_path: base_path.into(),
            console: Arc::new(SchemaConsole::with_options(database, options)),
        }
    }

    /// The console behind the router, for direct (non-HTTP) use
    pub fn console(&self) -> Arc<SchemaConsole<DB>> {
        self.console.clone()
    }

    /// Convert into an Axum Router that can be merged
    ///
    /// The returned router serves the API at `{base_path}/api/*` and traces
    /// every request.
    pub fn into_router(self) -> Router {
        let api_router = create_api_router(self.console);
        let base_path = self.base_path.trim_end_matches('/');

        Router::new()
            .nest(&format!("{}/api", base_path), api_router)
            .layer(TraceLayer::new_for_http())
    }
}

#[cfg(feature = "sqlite")]
impl ConsoleLayer<SqliteProvider> {
    /// Create a new console for SQLite
    ///
    /// # Arguments
    ///
    /// * `base_path` - The URL path where the API will be mounted
    /// * `pool` - The SQLite connection pool
    pub fn sqlite(base_path: impl Into<String>, pool: sqlx::SqlitePool) -> Self {
        Self::new(base_path, SqliteProvider::new(pool))
    }
}

#[cfg(feature = "postgres")]
impl ConsoleLayer<PostgresProvider> {
    /// Create a new console for PostgreSQL
    ///
    /// # Arguments
    ///
    /// * `base_path` - The URL path where the API will be mounted
    /// * `pool` - The PostgreSQL connection pool
    pub fn postgres(base_path: impl Into<String>, pool: sqlx::PgPool) -> Self {
        Self::new(base_path, PostgresProvider::new(pool))
    }
}
