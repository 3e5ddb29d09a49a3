//! SQL access layer for backend-agnostic database access.
//!
//! The abstraction is built on a small hierarchy of traits:
//!
//! - [`SqlExecutor`] - Execute parameterized SQL (required for all backends)
//! - [`Transaction`] - Transaction lifecycle (commit/rollback)
//! - [`DbClient`] - Connection management and transaction creation
//!
//! # Usage
//!
//! ```ignore
//! use workforce::db::QueryExt;
//!
//! let rows = client
//!     .query("SELECT id, name FROM company WHERE id = $1")
//!     .bind(company_id)
//!     .fetch_all()
//!     .await?;
//! ```

mod query;
mod row;
mod traits;

pub mod backends;

pub use query::{Query, QueryExt};
pub use row::{Params, Row, RowStream};
pub use traits::{DbClient, SqlExecutor, Transaction};
