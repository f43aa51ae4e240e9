//! Paginated row endpoint

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

/// Query parameters for fetching a page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page number (default: 1)
    pub page: Option<u64>,

    /// Rows per page (default: the console's default page size)
    pub page_size: Option<u64>,
}

/// Handler for GET /api/tables/{name}/rows
///
/// Query parameters:
/// - page: 1-based page number (default: 1)
/// - pageSize: rows per page (default: 25)
///
/// Pages past the end return an empty `rows` array, not an error.
pub async fn get_page_handler<DB: DatabaseProvider>(
    State(console): State<Arc<SchemaConsole<DB>>>,
    Path(table_name): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = query.page.unwrap_or(1);
    let page_size = query
        .page_size
        .unwrap_or(console.options().default_page_size);

    match console.get_page(&table_name, page, page_size).await {
        Ok(table_page) => (StatusCode::OK, Json(table_page)).into_response(),
        Err(failure) => {
            error!(table = %table_name, page, page_size, error = %failure, "failed to read page");
            error_response(&failure)
        }
    }
}
