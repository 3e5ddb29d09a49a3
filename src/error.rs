//! Application error types with stable application codes.

use thiserror::Error;

/// Application-level errors for Workforce.
#[derive(Error, Debug)]
pub enum AppError {
    // Domain errors
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    #[error("Company not found: {0}")]
    CompanyNotFound(i64),

    #[error("Employee must be 18~65 years old")]
    EmployeeCreate,

    #[error("Employee is inactive")]
    EmployeeUpdate,

    #[error("Invalid page: page number {page_number} and page size {page_size} must both be at least 1")]
    InvalidPage { page_number: u32, page_size: u32 },

    // Store errors
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {message}")]
    Query { message: String, query: String },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for this error, used by transports.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
            AppError::CompanyNotFound(_) => "COMPANY_NOT_FOUND",
            AppError::EmployeeCreate => "EMPLOYEE_CREATE",
            AppError::EmployeeUpdate => "EMPLOYEE_UPDATE",
            AppError::InvalidPage { .. } => "INVALID_PAGE",
            AppError::Connection(_) => "CONNECTION_ERROR",
            AppError::Query { .. } => "QUERY_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error reports a missing employee or company.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::EmployeeNotFound(_) | AppError::CompanyNotFound(_)
        )
    }
}
