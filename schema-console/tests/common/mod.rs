#![allow(dead_code)]

use schema_console::{ConsoleOptions, SchemaConsole, SqliteProvider};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// A single-connection in-memory database; every connection to
/// `sqlite::memory:` would otherwise see its own empty database
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

/// `orders` with `order_count` rows, an empty `audit_log`, and a table whose
/// name the identifier allow-list rejects
pub async fn seeded_pool(order_count: u32) -> SqlitePool {
    let pool = memory_pool().await;

    sqlx::raw_sql(
        r#"
        CREATE TABLE orders (
            id INTEGER PRIMARY KEY,
            customer TEXT NOT NULL,
            total REAL,
            note TEXT DEFAULT 'none'
        );
        CREATE TABLE audit_log (
            id INTEGER PRIMARY KEY,
            action TEXT NOT NULL,
            is_reviewed BOOLEAN
        );
        CREATE TABLE "odd name" (id INTEGER);
        INSERT INTO "odd name" (id) VALUES (1);
        "#,
    )
    .execute(&pool)
    .await
    .expect("schema");

    // ids 1..=order_count; even ids carry a note that needs CSV quoting
    sqlx::query(
        r#"
        WITH RECURSIVE seq(id) AS (
            SELECT 1 WHERE ? >= 1
            UNION ALL
            SELECT id + 1 FROM seq WHERE id < ?
        )
        INSERT INTO orders (id, customer, total, note)
        SELECT id, 'customer ' || id, id * 1.5, CASE WHEN id % 2 = 0 THEN 'gift, wrapped' END
        FROM seq
        "#,
    )
    .bind(order_count as i64)
    .bind(order_count as i64)
    .execute(&pool)
    .await
    .expect("seed orders");

    pool
}

pub async fn seeded_console(order_count: u32) -> SchemaConsole<SqliteProvider> {
    SchemaConsole::new(SqliteProvider::new(seeded_pool(order_count).await))
}

pub async fn seeded_console_with(
    order_count: u32,
    options: ConsoleOptions,
) -> SchemaConsole<SqliteProvider> {
    SchemaConsole::with_options(SqliteProvider::new(seeded_pool(order_count).await), options)
}
