use axum::{extract::State, http::StatusCode, routing::get, Router};
use schema_console::ConsoleLayer;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::ServerConfig;

#[derive(Clone)]
struct ApplicationState {
    pool: PgPool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    let application_state = ApplicationState { pool: pool.clone() };

    // Note: ConsoleLayer must be merged after with_state() since it returns a stateless Router.
    // Put your admin authentication in front of this router before exposing it.
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/api/health", get(health_handler))
        .with_state(application_state)
        .merge(ConsoleLayer::postgres(config.base_path.clone(), pool).into_router());

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    info!(address = %config.bind_address, "server running");
    info!(path = %format!("{}/api", config.base_path), "console API mounted");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root_handler() -> &'static str {
    "schema-console server"
}

async fn health_handler(
    State(state): State<ApplicationState>,
) -> Result<(StatusCode, &'static str), StatusCode> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok((StatusCode::OK, "Server is healthy"))
}
