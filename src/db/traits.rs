//! Core traits for database abstraction.
//!
//! - [`SqlExecutor`] - Required for all backends
//! - [`Transaction`] - Transaction lifecycle management
//! - [`DbClient`] - Connection pool and transaction creation

use async_trait::async_trait;

use crate::db::row::{Params, RowStream};
use crate::error::AppError;

/// Executes SQL statements against the database.
///
/// Parameters are positional and bound to `$1`, `$2`, ... in order.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Executes a query and returns a stream of result rows.
    async fn query_sql(&self, sql: &str, params: Params) -> Result<RowStream<'_>, AppError>;

    /// Executes a statement and returns the number of affected rows.
    async fn execute_sql(&self, sql: &str, params: Params) -> Result<u64, AppError>;

    /// Executes one or more unparameterized statements (DDL, session setup).
    async fn batch_execute(&self, sql: &str) -> Result<(), AppError>;
}

/// Transaction lifecycle management.
#[async_trait]
pub trait Transaction: Send + Sync {
    /// Commits the transaction, making all changes permanent.
    async fn commit(self) -> Result<(), AppError>;

    /// Rolls back the transaction, discarding all changes.
    async fn rollback(self) -> Result<(), AppError>;
}

/// A database client that can begin transactions.
///
/// Statements issued through the [`SqlExecutor`] methods of the client
/// auto-commit; explicit transactions come from [`begin`](DbClient::begin).
#[async_trait]
pub trait DbClient: SqlExecutor {
    /// The transaction type returned by this client.
    type Tx<'a>: Transaction + SqlExecutor
    where
        Self: 'a;

    /// Begins a new transaction.
    async fn begin(&self) -> Result<Self::Tx<'_>, AppError>;
}
