//! Query builder for fluent SQL statement construction.

use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::db::row::{Params, Row, RowStream};
use crate::db::traits::SqlExecutor;
use crate::error::AppError;

/// A builder for binding parameters and executing SQL.
///
/// ```ignore
/// let row = Query::new(&client, "SELECT id, name FROM company WHERE id = $1")
///     .bind(42)
///     .fetch_one()
///     .await?;
/// ```
pub struct Query<'a, E: SqlExecutor + ?Sized> {
    executor: &'a E,
    sql: String,
    params: Params,
    error: Option<AppError>,
}

impl<'a, E: SqlExecutor + ?Sized> Query<'a, E> {
    pub fn new(executor: &'a E, sql: &str) -> Self {
        Self {
            executor,
            sql: sql.to_string(),
            params: Params::new(),
            error: None,
        }
    }

    /// Binds the next positional parameter (`$1`, `$2`, ...).
    ///
    /// A value that fails to serialize is reported when the query runs.
    pub fn bind<T: Serialize>(mut self, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => self.params.push(value),
            Err(e) => {
                self.error.get_or_insert_with(|| {
                    AppError::Internal(format!(
                        "failed to serialize parameter ${}: {}",
                        self.params.len() + 1,
                        e
                    ))
                });
            }
        }
        self
    }

    /// Executes the query and returns a stream of rows.
    pub async fn stream(self) -> Result<RowStream<'a>, AppError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.executor.query_sql(&self.sql, self.params).await
    }

    /// Executes the query and collects all rows into a vector.
    pub async fn fetch_all(self) -> Result<Vec<Row>, AppError> {
        self.stream().await?.try_collect().await
    }

    /// Executes the query and returns the first row, if any.
    pub async fn fetch_one(self) -> Result<Option<Row>, AppError> {
        let mut stream = self.stream().await?;
        stream.next().await.transpose()
    }

    /// Executes the statement and returns the number of affected rows.
    pub async fn execute(self) -> Result<u64, AppError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.executor.execute_sql(&self.sql, self.params).await
    }
}

/// Extension trait providing `executor.query("...")`.
pub trait QueryExt: SqlExecutor {
    fn query(&self, sql: &str) -> Query<'_, Self>
    where
        Self: Sized,
    {
        Query::new(self, sql)
    }
}

impl<E: SqlExecutor> QueryExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as JsonValue};
    use std::collections::HashMap;

    // Mock executor asserting on the statement it receives
    struct MockExecutor {
        expected_sql: String,
        expected_params: Params,
    }

    #[async_trait::async_trait]
    impl SqlExecutor for MockExecutor {
        async fn query_sql(&self, sql: &str, params: Params) -> Result<RowStream<'_>, AppError> {
            assert_eq!(sql, self.expected_sql);
            assert_eq!(params, self.expected_params);
            let mut data = HashMap::new();
            data.insert("id".to_string(), json!(1));
            Ok(Box::pin(futures::stream::iter(vec![Ok(Row::new(data))])))
        }

        async fn execute_sql(&self, sql: &str, params: Params) -> Result<u64, AppError> {
            assert_eq!(sql, self.expected_sql);
            assert_eq!(params, self.expected_params);
            Ok(1)
        }

        async fn batch_execute(&self, _sql: &str) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_query_binds_in_order() {
        let executor = MockExecutor {
            expected_sql: "SELECT id FROM employee WHERE gender = $1 LIMIT $2".to_string(),
            expected_params: vec![json!("Female"), json!(10)],
        };

        let rows = executor
            .query("SELECT id FROM employee WHERE gender = $1 LIMIT $2")
            .bind("Female")
            .bind(10)
            .fetch_all()
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_query_fetch_one() {
        let executor = MockExecutor {
            expected_sql: "SELECT id FROM company".to_string(),
            expected_params: vec![],
        };

        let row = executor
            .query("SELECT id FROM company")
            .fetch_one()
            .await
            .unwrap()
            .expect("one row");
        assert_eq!(row.get::<i64>("id").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_query_execute() {
        let executor = MockExecutor {
            expected_sql: "DELETE FROM company WHERE id = $1".to_string(),
            expected_params: vec![json!(1)],
        };

        let affected = executor
            .query("DELETE FROM company WHERE id = $1")
            .bind(1_i64)
            .execute()
            .await
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[tokio::test]
    async fn test_query_null_binding() {
        let executor = MockExecutor {
            expected_sql: "UPDATE employee SET company_id = $1".to_string(),
            expected_params: vec![JsonValue::Null],
        };

        let result = executor
            .query("UPDATE employee SET company_id = $1")
            .bind(Option::<i64>::None)
            .execute()
            .await;
        assert!(result.is_ok());
    }
}
