//! The introspection and query engine
//!
//! [`SchemaConsole`] wraps a [`DatabaseProvider`] and owns every policy
//! decision: identifier validation, pagination, the ad-hoc timeout, the
//! export cap and per-table failure isolation.

use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::database::traits::DatabaseProvider;
use crate::export::{encode, export_filename, ExportFormat, ExportResult, MAX_EXPORT_ROWS};
use crate::generate::{
    render_schema_context, render_typescript, GeneratedTypes, SchemaSnapshot, TableColumns,
};
use crate::identifier::ValidIdentifier;
use crate::options::ConsoleOptions;
use crate::schema::{
    total_pages, AdHocQueryResult, ColumnDescriptor, QueryFailure, RowWindow, TableDescriptor,
    TablePage, MAX_PAGE_SIZE,
};
use crate::{Error, Result};

pub struct SchemaConsole<DB: DatabaseProvider> {
    database: DB,
    options: ConsoleOptions,
}

impl<DB: DatabaseProvider> SchemaConsole<DB> {
    pub fn new(database: DB) -> Self {
        Self::with_options(database, ConsoleOptions::default())
    }

    pub fn with_options(database: DB, options: ConsoleOptions) -> Self {
        Self { database, options }
    }

    pub fn options(&self) -> &ConsoleOptions {
        &self.options
    }

    pub fn database(&self) -> &DB {
        &self.database
    }

    /// List every public base table with its row count
    ///
    /// A table whose count fails (dropped concurrently, no permission, or a
    /// name the identifier allow-list rejects) is still listed, with a row
    /// count of zero.
    pub async fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        let names = self.database.list_table_names().await?;
        let mut tables = Vec::with_capacity(names.len());

        for name in names {
            let row_count = match ValidIdentifier::parse(&name) {
                Ok(table) => match self.database.count_rows(&table).await {
                    Ok(count) => count,
                    Err(error) => {
                        warn!(table = %name, %error, "row count failed, reporting zero");
                        0
                    }
                },
                Err(_) => {
                    warn!(table = %name, "table name not countable, reporting zero rows");
                    0
                }
            };

            tables.push(TableDescriptor { name, row_count });
        }

        Ok(tables)
    }

    /// Table names offered for export
    pub async fn list_exportable_tables(&self) -> Result<Vec<String>> {
        Ok(self.database.list_table_names().await?)
    }

    pub async fn list_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let table = ValidIdentifier::parse(table)?;
        Ok(self.database.list_columns(table.as_str()).await?)
    }

    /// Fetch one 1-based page of a table
    ///
    /// Rows are ordered by the first column. That keeps pages stable but is
    /// not necessarily primary-key or insertion order. A page past the end
    /// has no rows and is not an error.
    pub async fn get_page(&self, table: &str, page: u64, page_size: u64) -> Result<TablePage> {
        let table = ValidIdentifier::parse(table)?;

        if page == 0 || page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidPagination { page, page_size });
        }

        let columns = self.database.list_columns(table.as_str()).await?;
        let total_rows = self.database.count_rows(&table).await?;

        // total_rows fits in i64, so any offset below it does too
        let window = RowWindow::page(page, page_size);
        let rows = if window.offset < total_rows {
            self.database.fetch_rows(&table, window).await?
        } else {
            Vec::new()
        };

        debug!(
            table = %table,
            page,
            page_size,
            total_rows,
            returned = rows.len(),
            "read table page"
        );

        Ok(TablePage {
            columns,
            rows,
            total_rows,
            page,
            page_size,
            total_pages: total_pages(total_rows, page_size),
        })
    }

    /// Run an operator-supplied statement
    ///
    /// Never returns `Err`: blank input, timeouts and database failures are
    /// reported inside the result. On timeout the statement is abandoned,
    /// not cancelled, and may keep running server-side.
    pub async fn execute_query(&self, sql: &str) -> AdHocQueryResult {
        if sql.trim().is_empty() {
            return AdHocQueryResult::failed(QueryFailure::Empty, 0);
        }

        let timeout = self.options.query_timeout();
        let started = Instant::now();
        let outcome = tokio::time::timeout(timeout, self.database.run_statement(sql)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(rows)) => {
                info!(rows = rows.len(), elapsed_ms, "ad-hoc query finished");
                AdHocQueryResult::from_rows(rows, elapsed_ms)
            }
            Ok(Err(error)) => {
                info!(%error, elapsed_ms, "ad-hoc query failed");
                AdHocQueryResult::failed(
                    QueryFailure::Database(error.native_message().to_string()),
                    elapsed_ms,
                )
            }
            Err(_) => {
                warn!(
                    elapsed_ms,
                    timeout_ms = timeout.as_millis() as u64,
                    "ad-hoc query abandoned after timeout"
                );
                AdHocQueryResult::failed(QueryFailure::Timeout(timeout), elapsed_ms)
            }
        }
    }

    pub async fn export_csv(&self, table: &str) -> Result<ExportResult> {
        self.export(table, ExportFormat::Csv).await
    }

    pub async fn export_json(&self, table: &str) -> Result<ExportResult> {
        self.export(table, ExportFormat::Json).await
    }

    /// Export at most [`MAX_EXPORT_ROWS`] rows of a table
    ///
    /// One extra row is requested so the result can say whether anything
    /// was left out.
    pub async fn export(&self, table: &str, format: ExportFormat) -> Result<ExportResult> {
        let table = ValidIdentifier::parse(table)?;
        let limit = MAX_EXPORT_ROWS;

        let mut rows = self
            .database
            .fetch_rows(&table, RowWindow::head(limit.saturating_add(1)))
            .await?;

        let truncated = rows.len() as u64 > limit;
        rows.truncate(limit as usize);

        let content = encode(&rows, format)?;

        info!(table = %table, ?format, rows = rows.len(), truncated, "exported table");

        Ok(ExportResult {
            content,
            row_count: rows.len() as u64,
            filename: export_filename(table.as_str(), format, Utc::now()),
            truncated,
        })
    }

    /// Every public table with its columns
    ///
    /// Column lookups bind the catalog name as a parameter, so tables whose
    /// names the identifier allow-list rejects are included too.
    pub async fn schema_snapshot(&self) -> Result<SchemaSnapshot> {
        let names = self.database.list_table_names().await?;
        let mut snapshot = Vec::with_capacity(names.len());

        for name in names {
            let columns = self.database.list_columns(&name).await?;
            snapshot.push(TableColumns { table: name, columns });
        }

        Ok(snapshot)
    }

    /// TypeScript interfaces for every public table
    pub async fn generate_types(&self) -> Result<GeneratedTypes> {
        let snapshot = self.schema_snapshot().await?;
        Ok(render_typescript(&snapshot, Utc::now()))
    }

    /// Markdown description of the public schema
    pub async fn generate_schema_context(&self) -> Result<String> {
        let snapshot = self.schema_snapshot().await?;
        Ok(render_schema_context(&snapshot, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::traits::DatabaseError;
    use crate::schema::Row;
    use async_trait::async_trait;

    /// Two tables; counting `locked` fails the way a permission error would
    struct LockedTableDatabase;

    #[async_trait]
    impl DatabaseProvider for LockedTableDatabase {
        async fn list_table_names(&self) -> std::result::Result<Vec<String>, DatabaseError> {
            Ok(vec!["locked".to_string(), "orders".to_string()])
        }

        async fn list_columns(
            &self,
            _table: &str,
        ) -> std::result::Result<Vec<ColumnDescriptor>, DatabaseError> {
            Ok(Vec::new())
        }

        async fn count_rows(
            &self,
            table: &ValidIdentifier,
        ) -> std::result::Result<u64, DatabaseError> {
            match table.as_str() {
                "locked" => Err(DatabaseError::Query(
                    "permission denied for table locked".to_string(),
                )),
                _ => Ok(7),
            }
        }

        async fn fetch_rows(
            &self,
            _table: &ValidIdentifier,
            _window: RowWindow,
        ) -> std::result::Result<Vec<Row>, DatabaseError> {
            Ok(Vec::new())
        }

        async fn run_statement(&self, _sql: &str) -> std::result::Result<Vec<Row>, DatabaseError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn failed_count_reports_zero_without_failing_the_listing() {
        let console = SchemaConsole::new(LockedTableDatabase);

        let tables = console.list_tables().await.unwrap();

        assert_eq!(
            tables,
            vec![
                TableDescriptor { name: "locked".to_string(), row_count: 0 },
                TableDescriptor { name: "orders".to_string(), row_count: 7 },
            ]
        );
    }

    #[tokio::test]
    async fn failed_count_still_fails_a_page_read() {
        let console = SchemaConsole::new(LockedTableDatabase);

        assert!(matches!(
            console.get_page("locked", 1, 10).await,
            Err(Error::Database(DatabaseError::Query(_)))
        ));
    }
}
