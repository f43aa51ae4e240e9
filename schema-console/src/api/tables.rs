//! Table listing and column metadata endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::error;

use super::error_response;
use crate::console::SchemaConsole;
use crate::database::traits::DatabaseProvider;
use crate::schema::TablesResponse;

/// Handler for GET /api/tables
///
/// Returns every public base table with its row count. Tables whose count
/// fails are listed with a count of zero.
pub async fn list_tables_handler<DB: DatabaseProvider>(
    State(console): State<Arc<SchemaConsole<DB>>>,
) -> Response {
    match console.list_tables().await {
        Ok(tables) => (StatusCode::OK, Json(TablesResponse { tables })).into_response(),
        Err(failure) => {
            error!(error = %failure, "failed to list tables");
            error_response(&failure)
        }
    }
}

/// Handler for GET /api/tables/{name}/columns
///
/// Returns the columns of a table in ordinal order. Unknown tables yield an
/// empty list; names outside the identifier allow-list yield 400.
pub async fn list_columns_handler<DB: DatabaseProvider>(
    State(console): State<Arc<SchemaConsole<DB>>>,
    Path(table_name): Path<String>,
) -> Response {
    match console.list_columns(&table_name).await {
        Ok(columns) => (StatusCode::OK, Json(columns)).into_response(),
        Err(failure) => {
            error!(table = %table_name, error = %failure, "failed to list columns");
            error_response(&failure)
        }
    }
}
