//! PostgreSQL database provider implementation

use crate::database::statements::{count_statement, select_statement};
use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::identifier::ValidIdentifier;
use crate::schema::{ColumnDescriptor, Row, RowWindow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use sqlx::types::Uuid;
use sqlx::{postgres::PgRow, Column, PgPool, Row as _, TypeInfo};
use tracing::debug;

/// PostgreSQL database provider
pub struct PostgresProvider {
    pool: PgPool,
}

impl PostgresProvider {
    /// Create a new PostgreSQL provider
    ///
    /// # Arguments
    ///
    /// * `pool` - PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a PostgreSQL row to a JSON object, keeping result column order
    fn row_to_json(row: &PgRow) -> Result<Row, DatabaseError> {
        let mut map = Row::new();

        for column in row.columns() {
            let value = Self::column_to_json(row, column.ordinal(), column.type_info().name())?;
            map.insert(column.name().to_string(), value);
        }

        Ok(map)
    }

    fn column_to_json(row: &PgRow, index: usize, type_name: &str) -> Result<Value, DatabaseError> {
        let value: Option<Value> = match type_name {
            "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(Value::Bool),
            "INT2" => row.try_get::<Option<i16>, _>(index)?.map(Value::from),
            "INT4" => row.try_get::<Option<i32>, _>(index)?.map(Value::from),
            "INT8" => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
            "FLOAT4" => row
                .try_get::<Option<f32>, _>(index)?
                .and_then(|value| Number::from_f64(value as f64))
                .map(Value::Number),
            "FLOAT8" => row
                .try_get::<Option<f64>, _>(index)?
                .and_then(Number::from_f64)
                .map(Value::Number),
            // String keeps the full precision
            "NUMERIC" => match row.try_get::<Option<Decimal>, _>(index) {
                Ok(value) => value.map(|decimal| Value::String(decimal.to_string())),
                Err(_) => Self::text_fallback(row, index),
            },
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CITEXT" | "UNKNOWN" => row
                .try_get::<Option<String>, _>(index)?
                .map(Value::String),
            "BYTEA" => row
                .try_get::<Option<Vec<u8>>, _>(index)?
                .map(|bytes| Value::String(hex_literal(&bytes))),
            "TIMESTAMPTZ" => row
                .try_get::<Option<DateTime<Utc>>, _>(index)?
                .map(|timestamp| {
                    Value::String(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
                }),
            "TIMESTAMP" => row
                .try_get::<Option<NaiveDateTime>, _>(index)?
                .map(|timestamp| {
                    Value::String(timestamp.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
                }),
            "DATE" => row
                .try_get::<Option<NaiveDate>, _>(index)?
                .map(|date| Value::String(date.to_string())),
            "TIME" => row
                .try_get::<Option<NaiveTime>, _>(index)?
                .map(|time| Value::String(time.to_string())),
            "UUID" => row
                .try_get::<Option<Uuid>, _>(index)?
                .map(|uuid| Value::String(uuid.to_string())),
            "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index)?,
            "TEXT[]" | "VARCHAR[]" | "BPCHAR[]" | "NAME[]" => row
                .try_get::<Option<Vec<Option<String>>>, _>(index)?
                .map(|items| items.into_iter().map(Value::from).collect()),
            "INT4[]" => row
                .try_get::<Option<Vec<Option<i32>>>, _>(index)?
                .map(|items| items.into_iter().map(Value::from).collect()),
            "INT8[]" => row
                .try_get::<Option<Vec<Option<i64>>>, _>(index)?
                .map(|items| items.into_iter().map(Value::from).collect()),
            "BOOL[]" => row
                .try_get::<Option<Vec<Option<bool>>>, _>(index)?
                .map(|items| items.into_iter().map(Value::from).collect()),
            // Enums, intervals, network and geometric types, other arrays
            _ => Self::text_fallback(row, index),
        };

        Ok(value.unwrap_or(Value::Null))
    }

    /// Read any value as its text rendering
    ///
    /// Row reads go through the simple-query protocol, where PostgreSQL sends
    /// every value in text format; this covers intervals, network and
    /// geometric types, money, enums and arrays without a dedicated decoder.
    fn text_fallback(row: &PgRow, index: usize) -> Option<Value> {
        row.try_get::<Option<String>, _>(index)
            .or_else(|_| row.try_get_unchecked::<Option<String>, _>(index))
            .ok()
            .flatten()
            .map(Value::String)
    }
}

/// PostgreSQL's `\x...` hex rendering of binary data
fn hex_literal(bytes: &[u8]) -> String {
    let mut literal = String::with_capacity(2 + bytes.len() * 2);
    literal.push_str("\\x");
    for byte in bytes {
        literal.push_str(&format!("{byte:02x}"));
    }
    literal
}

#[async_trait]
impl DatabaseProvider for PostgresProvider {
    async fn list_table_names(&self) -> Result<Vec<String>, DatabaseError> {
        let query = r#"
            SELECT table_name::text AS table_name
            FROM information_schema.tables
            WHERE table_schema = 'public'
              AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("table_name").map_err(DatabaseError::from))
            .collect()
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DatabaseError> {
        let column_query = r#"
            SELECT
                column_name::text AS column_name,
                data_type::text AS data_type,
                udt_name::text AS udt_name,
                is_nullable::text AS is_nullable,
                column_default::text AS column_default
            FROM information_schema.columns
            WHERE table_schema = 'public'
              AND table_name = $1
            ORDER BY ordinal_position
        "#;

        let column_rows = sqlx::query(column_query)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        let columns = column_rows
            .iter()
            .map(|row| {
                let is_nullable: String = row.try_get("is_nullable")?;

                Ok(ColumnDescriptor {
                    name: row.try_get("column_name")?,
                    native_type: row.try_get("data_type")?,
                    element_type: row.try_get("udt_name")?,
                    nullable: is_nullable == "YES",
                    default_value: row.try_get("column_default")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        debug!(table = %table, columns = columns.len(), "read column metadata");

        Ok(columns)
    }

    async fn count_rows(&self, table: &ValidIdentifier) -> Result<u64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(&count_statement(table))
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn fetch_rows(
        &self,
        table: &ValidIdentifier,
        window: RowWindow,
    ) -> Result<Vec<Row>, DatabaseError> {
        // Same protocol as ad-hoc statements, so every value arrives as text
        // and pages, exports and the query console render it identically
        let rows = sqlx::raw_sql(&select_statement(table, window))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_json).collect()
    }

    async fn run_statement(&self, sql: &str) -> Result<Vec<Row>, DatabaseError> {
        // Simple-query protocol: multi-statement scripts and DDL are accepted
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;

        rows.iter().map(Self::row_to_json).collect()
    }
}
