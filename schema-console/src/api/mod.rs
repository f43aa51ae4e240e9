//! REST API endpoints
//!
//! This module contains the JSON handlers that expose a [`SchemaConsole`].
//! Authentication is not handled here; mount the router behind the
//! application's own admin check.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::console::SchemaConsole;
use crate::database::traits::DatabaseProvider;
use crate::Error;

pub mod export;
pub mod generate;
pub mod query;
pub mod rows;
pub mod tables;

// Re-export handlers for convenience
pub use export::{export_table_handler, list_exportable_tables_handler};
pub use generate::{generate_types_handler, schema_context_handler};
pub use query::execute_query_handler;
pub use rows::get_page_handler;
pub use tables::{list_columns_handler, list_tables_handler};

/// Create the API router with all endpoints
///
/// # Arguments
///
/// * `console` - Arc-wrapped console over a database provider
///
/// # Returns
///
/// An Axum Router configured with all API routes
pub fn create_api_router<DB: DatabaseProvider>(console: Arc<SchemaConsole<DB>>) -> Router {
    // Note: Axum 0.8 uses {param} syntax instead of :param
    Router::new()
        .route("/tables", get(list_tables_handler::<DB>))
        .route("/tables/{name}/columns", get(list_columns_handler::<DB>))
        .route("/tables/{name}/rows", get(get_page_handler::<DB>))
        .route("/tables/{name}/export", get(export_table_handler::<DB>))
        .route("/export/tables", get(list_exportable_tables_handler::<DB>))
        .route("/query", post(execute_query_handler::<DB>))
        .route("/types", get(generate_types_handler::<DB>))
        .route("/context", get(schema_context_handler::<DB>))
        .with_state(console)
}

/// Map a console error to a JSON error response
pub(crate) fn error_response(error: &Error) -> Response {
    let status = match error {
        Error::InvalidIdentifier(_) | Error::InvalidPagination { .. } => StatusCode::BAD_REQUEST,
        Error::Database(_) | Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(serde_json::json!({
            "error": error.to_string()
        })),
    )
        .into_response()
}
