//! Data access layer for employees and companies.
//!
//! Services depend on the [`EmployeeStore`] and [`CompanyStore`] traits;
//! PostgreSQL and in-memory implementations are provided.

mod company;
mod employee;
mod memory;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Company, Employee, PageRequest};

pub use company::PostgresCompanyStore;
pub use employee::PostgresEmployeeStore;
pub use memory::{InMemoryCompanyStore, InMemoryEmployeeStore};

/// Persistence operations for employees.
///
/// Results are ordered by id unless stated otherwise.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Employee>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError>;

    /// Employees whose gender equals `gender` exactly (case-sensitive).
    async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, AppError>;

    async fn find_by_company_id(&self, company_id: i64) -> Result<Vec<Employee>, AppError>;

    /// At most `page.size()` employees, skipping `page.offset()`.
    async fn find_page(&self, page: PageRequest) -> Result<Vec<Employee>, AppError>;

    /// Inserts when `employee.id` is `None` (assigning an id), otherwise
    /// updates the stored record. Returns the persisted value.
    async fn save(&self, employee: Employee) -> Result<Employee, AppError>;

    /// Removes the employee. Deleting an unknown id is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

/// Persistence operations for companies.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Company>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError>;

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Company>, AppError>;

    /// Inserts when `company.id` is `None`, otherwise updates.
    async fn save(&self, company: Company) -> Result<Company, AppError>;

    /// Removes the company. Employees referencing it are left untouched.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}
