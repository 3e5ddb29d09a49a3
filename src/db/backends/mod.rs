//! Backend implementations for different databases.
//!
//! Each backend implements the core traits from [`crate::db`]:
//! [`SqlExecutor`](crate::db::SqlExecutor) and [`DbClient`](crate::db::DbClient)
//! on the client, [`Transaction`](crate::db::Transaction) and
//! [`SqlExecutor`](crate::db::SqlExecutor) on its transaction type.

pub mod postgres;
