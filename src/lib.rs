//! Workforce - Employee and company records backend
//!
//! Services enforcing the employee and company lifecycle rules on top of
//! pluggable stores (PostgreSQL or in-memory).

pub mod cli;
pub mod config;
pub mod context;
pub mod db;
pub mod di;
pub mod error;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
