//! Company service: company records and the company → employees lookup.

use crate::context::{AppCompanyStore, AppEmployeeStore, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{Company, CompanyPatch, Employee, PageRequest};

/// Service for company records.
///
/// Companies carry no lifecycle rules; deleting one leaves the employees
/// that reference it untouched.
#[derive(FromContext, Clone)]
pub struct CompanyService {
    companies: AppCompanyStore,
    employees: AppEmployeeStore,
}

impl CompanyService {
    pub fn new(companies: AppCompanyStore, employees: AppEmployeeStore) -> Self {
        Self {
            companies,
            employees,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Company>, AppError> {
        self.companies.find_all().await
    }

    /// Page `page_number` (1-based) of `page_size` companies.
    pub async fn find_by_page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<Vec<Company>, AppError> {
        let page = PageRequest::from_page_number(page_number, page_size)?;
        tracing::debug!(index = page.index(), size = page.size(), "Fetching company page");
        self.companies.find_page(page).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Company, AppError> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or(AppError::CompanyNotFound(id))
    }

    pub async fn create(&self, company: Company) -> Result<Company, AppError> {
        let saved = self.companies.save(company).await?;
        tracing::info!(id = ?saved.id, name = %saved.name, "Created company");
        Ok(saved)
    }

    /// Replaces the company name.
    pub async fn update(&self, id: i64, patch: CompanyPatch) -> Result<Company, AppError> {
        let mut company = self.find_by_id(id).await?;
        patch.apply_to(&mut company);
        self.companies.save(company.clone()).await?;
        tracing::info!(id, name = %company.name, "Updated company");
        Ok(company)
    }

    /// Employees referencing the company. The company itself is not looked up.
    pub async fn find_employees_by_company_id(&self, id: i64) -> Result<Vec<Employee>, AppError> {
        self.employees.find_by_company_id(id).await
    }

    /// Deletes by id without checking existence or touching employees.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.companies.delete_by_id(id).await?;
        tracing::info!(id, "Deleted company");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::testing::{MockCompanyStore, MockEmployeeStore, StoreCall};

    struct Fixture {
        companies: Arc<MockCompanyStore>,
        employees: Arc<MockEmployeeStore>,
        service: CompanyService,
    }

    fn fixture(companies: Vec<Company>, employees: Vec<Employee>) -> Fixture {
        let companies = Arc::new(MockCompanyStore::with(companies));
        let employees = Arc::new(MockEmployeeStore::with(employees));
        let service = CompanyService::new(companies.clone(), employees.clone());
        Fixture {
            companies,
            employees,
            service,
        }
    }

    fn oocl() -> Company {
        Company::new("OOCL").with_id(1)
    }

    #[tokio::test]
    async fn test_find_all() {
        let f = fixture(vec![oocl()], vec![]);
        assert_eq!(f.service.find_all().await.unwrap(), vec![oocl()]);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let f = fixture(vec![oocl()], vec![]);
        assert_eq!(f.service.find_by_id(1).await.unwrap(), oocl());
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let f = fixture(vec![], vec![]);
        let result = f.service.find_by_id(999).await;
        assert!(matches!(result, Err(AppError::CompanyNotFound(999))));
    }

    #[tokio::test]
    async fn test_find_by_page() {
        let f = fixture(vec![oocl(), Company::new("COSCO").with_id(2)], vec![]);

        let page = f.service.find_by_page(2, 1).await.unwrap();
        assert_eq!(page, vec![Company::new("COSCO").with_id(2)]);
        assert_eq!(f.companies.calls(), vec![StoreCall::FindPage(PageRequest::of(1, 1))]);
    }

    #[tokio::test]
    async fn test_find_by_page_rejects_zero_size() {
        let f = fixture(vec![oocl()], vec![]);
        let result = f.service.find_by_page(1, 0).await;
        assert!(matches!(result, Err(AppError::InvalidPage { .. })));
        assert!(f.companies.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_saves_unconditionally() {
        let f = fixture(vec![], vec![]);

        let created = f.service.create(Company::new("OOCL")).await.unwrap();
        assert_eq!(created, oocl());
        assert_eq!(f.companies.saved(), vec![Company::new("OOCL")]);
    }

    #[tokio::test]
    async fn test_update_overwrites_name() {
        let f = fixture(vec![oocl()], vec![]);

        let updated = f
            .service
            .update(1, CompanyPatch::new("CMA CGM"))
            .await
            .unwrap();

        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.name, "CMA CGM");
        assert_eq!(f.companies.saved(), vec![Company::new("CMA CGM").with_id(1)]);
    }

    #[tokio::test]
    async fn test_update_missing_company() {
        let f = fixture(vec![], vec![]);
        let result = f.service.update(3, CompanyPatch::new("X")).await;
        assert!(matches!(result, Err(AppError::CompanyNotFound(3))));
        assert!(f.companies.saved().is_empty());
    }

    #[tokio::test]
    async fn test_find_employees_by_company_id_skips_company_lookup() {
        let alice = Employee::new("Alice", 20, "Female", 3000).with_id(1).with_company(1);
        let bob = Employee::new("Bob", 30, "Male", 4000).with_id(2).with_company(2);
        let f = fixture(vec![], vec![alice.clone(), bob]);

        let found = f.service.find_employees_by_company_id(1).await.unwrap();
        assert_eq!(found, vec![alice]);
        assert_eq!(f.employees.calls(), vec![StoreCall::FindByCompanyId(1)]);
        assert!(f.companies.calls().is_empty());

        assert!(f.service.find_employees_by_company_id(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_calls_store_once_without_reading() {
        let f = fixture(vec![oocl()], vec![]);

        f.service.delete(1).await.unwrap();
        assert_eq!(f.companies.calls(), vec![StoreCall::DeleteById(1)]);
        assert!(f.employees.calls().is_empty());
    }
}
