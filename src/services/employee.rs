//! Employee service: creation, partial updates and lookups.

use crate::context::{AppEmployeeStore, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{Employee, EmployeePatch, EmployeeStatus, PageRequest};

/// Service enforcing the employee lifecycle.
///
/// - New employees must be 18 to 65 years old and are always stored active.
/// - Updates only touch age and salary, and are refused for inactive employees.
#[derive(FromContext, Clone)]
pub struct EmployeeService {
    employees: AppEmployeeStore,
}

impl EmployeeService {
    pub fn new(employees: AppEmployeeStore) -> Self {
        Self { employees }
    }

    /// All employees, in store order.
    pub async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        self.employees.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Employee, AppError> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or(AppError::EmployeeNotFound(id))
    }

    /// Employees whose gender matches exactly. Empty when none match.
    pub async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, AppError> {
        self.employees.find_all_by_gender(gender).await
    }

    /// Page `page_number` (1-based) of `page_size` employees.
    pub async fn find_by_page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<Vec<Employee>, AppError> {
        let page = PageRequest::from_page_number(page_number, page_size)?;
        tracing::debug!(index = page.index(), size = page.size(), "Fetching employee page");
        self.employees.find_page(page).await
    }

    /// Stores a new employee as active.
    ///
    /// Fails with `EmployeeCreate` without writing when the age is out of range.
    pub async fn create(&self, mut employee: Employee) -> Result<Employee, AppError> {
        if employee.has_invalid_age() {
            tracing::warn!(
                name = %employee.name,
                age = employee.age,
                "Rejected employee with invalid age"
            );
            return Err(AppError::EmployeeCreate);
        }

        employee.status = EmployeeStatus::Active;
        let saved = self.employees.save(employee).await?;
        tracing::info!(id = ?saved.id, name = %saved.name, "Created employee");
        Ok(saved)
    }

    /// Applies the present fields of `patch` to an active employee.
    ///
    /// Fails with `EmployeeUpdate` without writing when the employee is inactive.
    pub async fn update(&self, id: i64, patch: EmployeePatch) -> Result<Employee, AppError> {
        let mut employee = self.find_by_id(id).await?;
        if employee.is_inactive() {
            tracing::warn!(id, "Rejected update of inactive employee");
            return Err(AppError::EmployeeUpdate);
        }

        patch.apply_to(&mut employee);
        self.employees.save(employee.clone()).await?;
        tracing::info!(id, ?patch, "Updated employee");
        Ok(employee)
    }

    /// Deletes by id without checking that the employee exists.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.employees.delete_by_id(id).await?;
        tracing::info!(id, "Deleted employee");
        Ok(())
    }
}
