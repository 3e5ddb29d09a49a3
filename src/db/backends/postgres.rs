//! PostgreSQL backend implementation.
//!
//! # Example
//!
//! ```ignore
//! use workforce::db::backends::postgres::PostgresClient;
//! use workforce::db::QueryExt;
//!
//! let client = PostgresClient::connect("postgresql://localhost/workforce", 16).await?;
//! let rows = client.query("SELECT id, name FROM company").fetch_all().await?;
//! ```

use std::collections::HashMap;
use std::error::Error;

use async_trait::async_trait;
use bytes::BytesMut;
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use futures::TryStreamExt;
use serde_json::Value as JsonValue;
use tokio_postgres::types::{to_sql_checked, IsNull, Json, ToSql, Type};
use tokio_postgres::NoTls;

use crate::db::row::{Params, Row, RowStream};
use crate::db::traits::{DbClient, SqlExecutor, Transaction};
use crate::error::AppError;

// ----------------------------------------------------------------------------
// Parameter binding
// ----------------------------------------------------------------------------

/// A JSON parameter serialized according to the column type it binds to.
///
/// Numbers are narrowed to the exact integer width the server expects, so
/// the same `Params` work against `INTEGER` and `BIGINT` columns.
#[derive(Debug, Clone)]
struct PgParam(JsonValue);

impl ToSql for PgParam {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match &self.0 {
            JsonValue::Null => Ok(IsNull::Yes),
            JsonValue::Bool(value) => value.to_sql(ty, out),
            JsonValue::String(value) => value.as_str().to_sql(ty, out),
            JsonValue::Number(number) => match *ty {
                Type::INT2 => i16::try_from(integer(number)?)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(integer(number)?)?.to_sql(ty, out),
                Type::INT8 => integer(number)?.to_sql(ty, out),
                Type::FLOAT4 => (float(number)? as f32).to_sql(ty, out),
                Type::FLOAT8 => float(number)?.to_sql(ty, out),
                _ => Err(format!("cannot bind a number to column type {}", ty).into()),
            },
            value => Json(value).to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn integer(number: &serde_json::Number) -> Result<i64, Box<dyn Error + Sync + Send>> {
    number
        .as_i64()
        .ok_or_else(|| format!("{} is not an integer", number).into())
}

fn float(number: &serde_json::Number) -> Result<f64, Box<dyn Error + Sync + Send>> {
    number
        .as_f64()
        .ok_or_else(|| format!("{} is not representable as a float", number).into())
}

fn to_pg_params(params: Params) -> Vec<PgParam> {
    params.into_iter().map(PgParam).collect()
}

/// Formats a tokio-postgres error with the server-side detail, if any.
fn describe(e: &tokio_postgres::Error) -> String {
    e.as_db_error()
        .map(|db_err| {
            format!(
                "{}: {} ({})",
                db_err.severity(),
                db_err.message(),
                db_err.code().code()
            )
        })
        .unwrap_or_else(|| e.to_string())
}

fn query_error(e: &tokio_postgres::Error, sql: &str) -> AppError {
    AppError::Query {
        message: describe(e),
        query: sql.to_string(),
    }
}

// ----------------------------------------------------------------------------
// Client
// ----------------------------------------------------------------------------

/// PostgreSQL client with connection pooling via deadpool-postgres.
///
/// Cheap to clone - the underlying pool is `Arc`-based.
#[derive(Clone)]
pub struct PostgresClient {
    pool: Pool,
}

impl PostgresClient {
    /// Creates a new PostgreSQL client with at most `pool_size` connections.
    ///
    /// Connections are opened lazily, on first use.
    pub async fn connect(connection_string: &str, pool_size: usize) -> Result<Self, AppError> {
        if pool_size == 0 {
            return Err(AppError::Connection(
                "Connection pool size must be at least 1".to_string(),
            ));
        }

        let pg_config: tokio_postgres::Config = connection_string.parse().map_err(|e| {
            AppError::Connection(format!("Invalid PostgreSQL connection string: {}", e))
        })?;

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);
        let pool = Pool::builder(mgr)
            .max_size(pool_size)
            .build()
            .map_err(|e| AppError::Connection(format!("Failed to create connection pool: {}", e)))?;

        Ok(Self { pool })
    }

    async fn get_connection(&self) -> Result<Object, AppError> {
        self.pool
            .get()
            .await
            .map_err(|e| AppError::Connection(format!("Failed to get connection from pool: {}", e)))
    }
}

#[async_trait]
impl SqlExecutor for PostgresClient {
    async fn query_sql(&self, sql: &str, params: Params) -> Result<RowStream<'_>, AppError> {
        let conn = self.get_connection().await?;
        Ok(query_owned(conn, sql.to_string(), params))
    }

    async fn execute_sql(&self, sql: &str, params: Params) -> Result<u64, AppError> {
        let conn = self.get_connection().await?;
        let params = to_pg_params(params);
        conn.execute_raw(sql, params.iter())
            .await
            .map_err(|e| query_error(&e, sql))
    }

    async fn batch_execute(&self, sql: &str) -> Result<(), AppError> {
        let conn = self.get_connection().await?;
        conn.batch_execute(sql)
            .await
            .map_err(|e| query_error(&e, sql))
    }
}

#[async_trait]
impl DbClient for PostgresClient {
    type Tx<'a> = PostgresTransaction;

    async fn begin(&self) -> Result<Self::Tx<'_>, AppError> {
        let conn = self.get_connection().await?;

        conn.batch_execute("BEGIN")
            .await
            .map_err(|e| AppError::Connection(format!("Failed to begin transaction: {}", e)))?;

        Ok(PostgresTransaction {
            conn,
            finished: false,
        })
    }
}

// ----------------------------------------------------------------------------
// Transaction
// ----------------------------------------------------------------------------

/// PostgreSQL transaction on a pooled connection.
///
/// Must be explicitly committed or rolled back; dropping it unfinished
/// logs a warning.
pub struct PostgresTransaction {
    conn: Object,
    finished: bool,
}

#[async_trait]
impl SqlExecutor for PostgresTransaction {
    async fn query_sql(&self, sql: &str, params: Params) -> Result<RowStream<'_>, AppError> {
        let params = to_pg_params(params);
        let stream = self
            .conn
            .query_raw(sql, params.iter())
            .await
            .map_err(|e| query_error(&e, sql))?;

        Ok(Box::pin(stream.map_ok(|row| parse_pg_row(&row)).map_err(
            |e| AppError::Internal(format!("Failed to fetch row: {}", e)),
        )))
    }

    async fn execute_sql(&self, sql: &str, params: Params) -> Result<u64, AppError> {
        let params = to_pg_params(params);
        self.conn
            .execute_raw(sql, params.iter())
            .await
            .map_err(|e| query_error(&e, sql))
    }

    async fn batch_execute(&self, sql: &str) -> Result<(), AppError> {
        self.conn
            .batch_execute(sql)
            .await
            .map_err(|e| query_error(&e, sql))
    }
}

#[async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(mut self) -> Result<(), AppError> {
        self.finished = true;
        self.conn
            .batch_execute("COMMIT")
            .await
            .map_err(|e| AppError::Connection(format!("Failed to commit transaction: {}", e)))
    }

    async fn rollback(mut self) -> Result<(), AppError> {
        self.finished = true;
        self.conn
            .batch_execute("ROLLBACK")
            .await
            .map_err(|e| AppError::Connection(format!("Failed to rollback transaction: {}", e)))
    }
}

impl Drop for PostgresTransaction {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                "PostgresTransaction dropped without commit or rollback - connection state undefined"
            );
        }
    }
}

/// Runs a query on an owned connection.
///
/// The generator captures the connection, keeping it checked out of the
/// pool for the lifetime of the stream.
fn query_owned(conn: Object, sql: String, params: Params) -> RowStream<'static> {
    use async_stream::try_stream;

    let params = to_pg_params(params);

    Box::pin(try_stream! {
        let stream = conn
            .query_raw(sql.as_str(), params.iter())
            .await
            .map_err(|e| query_error(&e, &sql))?;

        futures::pin_mut!(stream);
        while let Some(pg_row) = stream.try_next().await.map_err(|e| {
            AppError::Internal(format!("Failed to fetch row: {}", e))
        })? {
            yield parse_pg_row(&pg_row);
        }
    })
}

/// Converts a PostgreSQL row into our generic Row type.
fn parse_pg_row(pg_row: &tokio_postgres::Row) -> Row {
    let mut data = HashMap::new();

    for (idx, column) in pg_row.columns().iter().enumerate() {
        let name = column.name().to_string();

        let value = match *column.type_() {
            Type::INT2 => pg_row
                .try_get::<_, Option<i16>>(idx)
                .ok()
                .flatten()
                .map(|v| JsonValue::Number(v.into())),
            Type::INT4 => pg_row
                .try_get::<_, Option<i32>>(idx)
                .ok()
                .flatten()
                .map(|v| JsonValue::Number(v.into())),
            Type::INT8 => pg_row
                .try_get::<_, Option<i64>>(idx)
                .ok()
                .flatten()
                .map(|v| JsonValue::Number(v.into())),
            Type::FLOAT4 => pg_row
                .try_get::<_, Option<f32>>(idx)
                .ok()
                .flatten()
                .and_then(|v| serde_json::Number::from_f64(v as f64))
                .map(JsonValue::Number),
            Type::FLOAT8 => pg_row
                .try_get::<_, Option<f64>>(idx)
                .ok()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(JsonValue::Number),
            Type::BOOL => pg_row
                .try_get::<_, Option<bool>>(idx)
                .ok()
                .flatten()
                .map(JsonValue::Bool),
            Type::TIMESTAMPTZ => pg_row
                .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)
                .ok()
                .flatten()
                .map(|v| JsonValue::String(v.to_rfc3339())),
            Type::JSON | Type::JSONB => pg_row.try_get::<_, Option<JsonValue>>(idx).ok().flatten(),
            Type::TEXT_ARRAY => pg_row
                .try_get::<_, Option<Vec<String>>>(idx)
                .ok()
                .flatten()
                .map(|v| JsonValue::Array(v.into_iter().map(JsonValue::String).collect())),
            // Fallback: text, varchar, name, bpchar and anything else readable as a string
            _ => pg_row
                .try_get::<_, Option<String>>(idx)
                .ok()
                .flatten()
                .map(JsonValue::String),
        };

        data.insert(name, value.unwrap_or(JsonValue::Null));
    }

    Row::new(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: JsonValue, ty: &Type) -> Result<(IsNull, Vec<u8>), String> {
        let mut out = BytesMut::new();
        PgParam(value)
            .to_sql(ty, &mut out)
            .map(|is_null| (is_null, out.to_vec()))
            .map_err(|e| e.to_string())
    }

    #[test]
    fn test_param_narrows_to_int4() {
        let (is_null, bytes) = encode(json!(20), &Type::INT4).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(bytes, 20_i32.to_be_bytes().to_vec());
    }

    #[test]
    fn test_param_int8() {
        let (_, bytes) = encode(json!(3000), &Type::INT8).unwrap();
        assert_eq!(bytes, 3000_i64.to_be_bytes().to_vec());
    }

    #[test]
    fn test_param_int4_overflow() {
        assert!(encode(json!(i64::MAX), &Type::INT4).is_err());
    }

    #[test]
    fn test_param_null() {
        let (is_null, bytes) = encode(JsonValue::Null, &Type::INT8).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_param_text_and_bool() {
        let (_, bytes) = encode(json!("Female"), &Type::TEXT).unwrap();
        assert_eq!(bytes, b"Female".to_vec());

        let (_, bytes) = encode(json!(true), &Type::BOOL).unwrap();
        assert_eq!(bytes, vec![1]);
    }

    #[test]
    fn test_param_number_into_text_column_fails() {
        assert!(encode(json!(1), &Type::TEXT).is_err());
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_pool() {
        let result = PostgresClient::connect("postgresql://localhost/workforce", 0).await;
        assert!(matches!(result, Err(AppError::Connection(_))));
    }
}
