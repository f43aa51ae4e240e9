//! Table export endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use super::error_response;
use crate::console::SchemaConsole;
use crate::database::traits::DatabaseProvider;
use crate::export::ExportFormat;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    /// "csv" (default) or "json"
    #[serde(default)]
    pub format: ExportFormat,
}

/// Handler for GET /api/export/tables
///
/// Returns the names of all exportable tables.
pub async fn list_exportable_tables_handler<DB: DatabaseProvider>(
    State(console): State<Arc<SchemaConsole<DB>>>,
) -> Response {
    match console.list_exportable_tables().await {
        Ok(names) => (StatusCode::OK, Json(names)).into_response(),
        Err(failure) => {
            error!(error = %failure, "failed to list exportable tables");
            error_response(&failure)
        }
    }
}

/// Handler for GET /api/tables/{name}/export?format=csv|json
///
/// Returns the encoded content with its row count, a suggested filename and
/// whether the export row limit cut it short. An empty table is a valid,
/// empty export.
pub async fn export_table_handler<DB: DatabaseProvider>(
    State(console): State<Arc<SchemaConsole<DB>>>,
    Path(table_name): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response {
    match console.export(&table_name, query.format).await {
        Ok(export) => (StatusCode::OK, Json(export)).into_response(),
        Err(failure) => {
            error!(table = %table_name, format = ?query.format, error = %failure, "export failed");
            error_response(&failure)
        }
    }
}
