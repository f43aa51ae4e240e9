//! Schema-derived artifact endpoints

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::error;

use super::error_response;
use crate::console::SchemaConsole;
use crate::database::traits::DatabaseProvider;

/// Handler for GET /api/types
///
/// Returns `{ types, tableCount }` where `types` is TypeScript source with
/// one interface per public table.
pub async fn generate_types_handler<DB: DatabaseProvider>(
    State(console): State<Arc<SchemaConsole<DB>>>,
) -> Response {
    match console.generate_types().await {
        Ok(generated) => (StatusCode::OK, Json(generated)).into_response(),
        Err(failure) => {
            error!(error = %failure, "type generation failed");
            error_response(&failure)
        }
    }
}

/// Handler for GET /api/context
///
/// Returns a Markdown description of the public schema.
pub async fn schema_context_handler<DB: DatabaseProvider>(
    State(console): State<Arc<SchemaConsole<DB>>>,
) -> Response {
    match console.generate_schema_context().await {
        Ok(markdown) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            markdown,
        )
            .into_response(),
        Err(failure) => {
            error!(error = %failure, "schema context generation failed");
            error_response(&failure)
        }
    }
}
