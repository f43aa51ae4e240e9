//! SQLite database provider implementation
//!
//! SQLite has no `information_schema`; tables come from `sqlite_master` and
//! columns from `pragma_table_info`. The declared column type is reported as
//! both the native and the element type.

use crate::database::statements::{count_statement, select_statement};
use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::identifier::ValidIdentifier;
use crate::schema::{ColumnDescriptor, Row, RowWindow};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteColumn, SqliteRow};
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};

/// SQLite database provider
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    /// Create a new SQLite provider
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert a SQLite row to a JSON object, keeping result column order
    fn row_to_json(row: &SqliteRow) -> Result<Row, DatabaseError> {
        let mut map = Row::new();

        for column in row.columns() {
            let value = Self::extract_column_value(row, column)?;
            map.insert(column.name().to_string(), value);
        }

        Ok(map)
    }

    /// Extract a column value from a SQLite row and convert to JSON
    fn extract_column_value(row: &SqliteRow, column: &SqliteColumn) -> Result<Value, DatabaseError> {
        let index = column.ordinal();

        if row.try_get_raw(index)?.is_null() {
            return Ok(Value::Null);
        }

        // SQLite reports the declared type when there is one, otherwise the
        // storage class of the value
        match column.type_info().name() {
            "INTEGER" | "BIGINT" | "INT8" => {
                if let Ok(value) = row.try_get::<i64, _>(index) {
                    return Ok(Value::from(value));
                }
            }
            "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => {
                if let Ok(value) = row.try_get::<f64, _>(index) {
                    if let Some(number) = serde_json::Number::from_f64(value) {
                        return Ok(Value::Number(number));
                    }
                }
            }
            "BOOLEAN" | "BOOL" => {
                if let Ok(value) = row.try_get::<bool, _>(index) {
                    return Ok(Value::Bool(value));
                }
            }
            "BLOB" => {
                if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
                    return Ok(Value::String(format!("[BLOB: {} bytes]", value.len())));
                }
            }
            _ => {
                if let Ok(value) = row.try_get::<String, _>(index) {
                    return Ok(Value::String(value));
                }
            }
        }

        // Dynamic typing: the stored value may not match the declared type
        if let Ok(value) = row.try_get::<i64, _>(index) {
            return Ok(Value::from(value));
        }
        if let Ok(value) = row.try_get::<f64, _>(index) {
            if let Some(number) = serde_json::Number::from_f64(value) {
                return Ok(Value::Number(number));
            }
        }
        if let Ok(value) = row.try_get::<String, _>(index) {
            return Ok(Value::String(value));
        }
        if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
            return Ok(Value::String(format!("[BLOB: {} bytes]", value.len())));
        }

        Ok(Value::Null)
    }
}

#[async_trait]
impl DatabaseProvider for SqliteProvider {
    async fn list_table_names(&self) -> Result<Vec<String>, DatabaseError> {
        let query = "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(DatabaseError::from))
            .collect()
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DatabaseError> {
        let query = r#"
            SELECT name, type, "notnull" AS not_null, pk, dflt_value
            FROM pragma_table_info(?)
            ORDER BY cid
        "#;

        let rows = sqlx::query(query)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        let columns = rows
            .iter()
            .map(|row| {
                let declared_type: String = row.try_get("type")?;
                let not_null: i64 = row.try_get("not_null")?;
                let primary_key: i64 = row.try_get("pk")?;

                Ok(ColumnDescriptor {
                    name: row.try_get("name")?,
                    native_type: declared_type.clone(),
                    element_type: declared_type,
                    nullable: not_null == 0 && primary_key == 0,
                    default_value: row.try_get("dflt_value")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

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
        let rows = sqlx::query(&select_statement(table, window))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_json).collect()
    }

    async fn run_statement(&self, sql: &str) -> Result<Vec<Row>, DatabaseError> {
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;

        rows.iter().map(Self::row_to_json).collect()
    }
}
