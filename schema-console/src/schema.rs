//! Schema types for dynamic database introspection
//!
//! These types are read-only projections computed from the live database on
//! every request. Nothing here is cached.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// A single result row, keyed by column name in result order
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A base table of the public schema (for listing)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    /// Table name
    pub name: String,

    /// Point-in-time row count, zero when counting failed
    pub row_count: u64,
}

/// Information about a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Catalog data type (e.g. "integer", "ARRAY", "USER-DEFINED")
    #[serde(rename = "type")]
    pub native_type: String,

    /// Underlying type name; for arrays this is the element type with a
    /// leading underscore (e.g. "_text")
    pub element_type: String,

    /// Whether the column allows NULL values
    pub nullable: bool,

    /// Default value expression (if any)
    pub default_value: Option<String>,
}

/// One page of a table, annotated with its column metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
    pub total_rows: u64,
    /// 1-based page number
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

/// Number of pages needed to hold `total_rows`; zero only for an empty table
pub fn total_pages(total_rows: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_rows.div_ceil(page_size)
}

/// Largest page size a statement can carry; LIMIT and OFFSET are signed
/// 64-bit integers in both supported databases
pub const MAX_PAGE_SIZE: u64 = i64::MAX as u64;

/// Row offset of a 1-based page, saturating at `u64::MAX`
pub fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// Window of rows requested from a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub limit: u64,
    pub offset: u64,

    /// Order by the first column so consecutive pages are stable
    pub ordered: bool,
}

impl RowWindow {
    /// Window for a 1-based page
    pub fn page(page: u64, page_size: u64) -> Self {
        Self {
            limit: page_size,
            offset: page_offset(page, page_size),
            ordered: true,
        }
    }

    /// Unordered window of the first `limit` rows
    pub fn head(limit: u64) -> Self {
        Self {
            limit,
            offset: 0,
            ordered: false,
        }
    }
}

/// Why an ad-hoc statement produced no rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryFailure {
    /// Blank input; the database was never contacted
    #[error("query is empty")]
    Empty,

    /// The statement did not finish in time. It may still be running
    /// server-side.
    #[error("query exceeded the {} ms time limit", .0.as_millis())]
    Timeout(Duration),

    /// The database rejected the statement; carries its native message
    #[error("{0}")]
    Database(String),
}

/// Outcome of an ad-hoc statement
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows { columns: Vec<String>, rows: Vec<Row> },
    Failed(QueryFailure),
}

/// Result from executing an ad-hoc statement
///
/// Failures are data here, not `Err`: callers render "0 rows, error: ..."
/// without any error plumbing. On the wire the outcome is flattened into
/// `columns`, `rows`, `rowCount`, `executionTimeMs` and `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "QueryResultBody")]
pub struct AdHocQueryResult {
    pub outcome: QueryOutcome,
    pub execution_time_milliseconds: u64,
}

impl AdHocQueryResult {
    /// Successful result; columns come from the first row's keys
    pub fn from_rows(rows: Vec<Row>, execution_time_milliseconds: u64) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        Self {
            outcome: QueryOutcome::Rows { columns, rows },
            execution_time_milliseconds,
        }
    }

    pub fn failed(failure: QueryFailure, execution_time_milliseconds: u64) -> Self {
        Self {
            outcome: QueryOutcome::Failed(failure),
            execution_time_milliseconds,
        }
    }

    pub fn columns(&self) -> &[String] {
        match &self.outcome {
            QueryOutcome::Rows { columns, .. } => columns,
            QueryOutcome::Failed(_) => &[],
        }
    }

    pub fn rows(&self) -> &[Row] {
        match &self.outcome {
            QueryOutcome::Rows { rows, .. } => rows,
            QueryOutcome::Failed(_) => &[],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    pub fn failure(&self) -> Option<&QueryFailure> {
        match &self.outcome {
            QueryOutcome::Failed(failure) => Some(failure),
            QueryOutcome::Rows { .. } => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryResultBody {
    columns: Vec<String>,
    rows: Vec<Row>,
    row_count: usize,
    #[serde(rename = "executionTimeMs")]
    execution_time_milliseconds: u64,
    error: Option<String>,
}

impl From<AdHocQueryResult> for QueryResultBody {
    fn from(result: AdHocQueryResult) -> Self {
        let execution_time_milliseconds = result.execution_time_milliseconds;

        match result.outcome {
            QueryOutcome::Rows { columns, rows } => Self {
                columns,
                row_count: rows.len(),
                rows,
                execution_time_milliseconds,
                error: None,
            },
            QueryOutcome::Failed(failure) => Self {
                columns: vec![],
                rows: vec![],
                row_count: 0,
                execution_time_milliseconds,
                error: Some(failure.to_string()),
            },
        }
    }
}

/// Request to execute a raw SQL statement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub sql: String,
}

/// Response from listing tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablesResponse {
    pub tables: Vec<TableDescriptor>,
}
