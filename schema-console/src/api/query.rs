//! Raw SQL query execution endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::console::SchemaConsole;
use crate::database::traits::DatabaseProvider;
use crate::schema::QueryRequest;

/// Handler for POST /api/query
///
/// Executes a raw SQL statement and returns the results.
///
/// # Security Warning
///
/// This endpoint allows executing ANY SQL statement including INSERT, UPDATE, DELETE.
///
/// Request body:
/// ```json
/// {
///   "sql": "SELECT * FROM users LIMIT 10"
/// }
/// ```
///
/// Response (success):
/// ```json
/// {
///   "columns": ["id", "name", "email"],
///   "rows": [...],
///   "rowCount": 10,
///   "executionTimeMs": 12,
///   "error": null
/// }
/// ```
///
/// Response (error, status 400):
/// ```json
/// {
///   "columns": [],
///   "rows": [],
///   "rowCount": 0,
///   "executionTimeMs": 3,
///   "error": "syntax error at or near \"SELCT\""
/// }
/// ```
pub async fn execute_query_handler<DB: DatabaseProvider>(
    State(console): State<Arc<SchemaConsole<DB>>>,
    Json(request): Json<QueryRequest>,
) -> Response {
    // Statement text can carry sensitive data; keep it at debug
    debug!(sql = %request.sql, "executing ad-hoc query");

    let result = console.execute_query(&request.sql).await;

    let status = if result.failure().is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    info!(status = status.as_u16(), rows = result.row_count(), "ad-hoc query answered");

    (status, Json(result)).into_response()
}
