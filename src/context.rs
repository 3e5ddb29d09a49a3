//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::db::backends::postgres::PostgresClient;
use crate::di::{Context as ContextDerive, FromRef};
use crate::error::AppError;
use crate::repositories::{
    CompanyStore, EmployeeStore, InMemoryCompanyStore, InMemoryEmployeeStore,
    PostgresCompanyStore, PostgresEmployeeStore,
};
use crate::services::{CompanyService, EmployeeService};

/// Shared employee store handle.
pub type AppEmployeeStore = Arc<dyn EmployeeStore>;

/// Shared company store handle.
pub type AppCompanyStore = Arc<dyn CompanyStore>;

/// Root application context for dependency injection.
///
/// `#[derive(Context)]` generates a `FromRef` implementation for each field,
/// which services resolve through `#[derive(FromContext)]`.
#[derive(ContextDerive, Clone)]
pub struct Context {
    pub employees: AppEmployeeStore,
    pub companies: AppCompanyStore,
}

impl Context {
    /// Creates a new context with the given stores.
    pub fn new(employees: AppEmployeeStore, companies: AppCompanyStore) -> Self {
        Self {
            employees,
            companies,
        }
    }

    /// Context over empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryEmployeeStore::new()),
            Arc::new(InMemoryCompanyStore::new()),
        )
    }

    /// Context over PostgreSQL stores sharing one connection pool.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = PostgresClient::connect(&config.postgres.uri, config.postgres.pool_size).await?;

        Ok(Self::new(
            Arc::new(PostgresEmployeeStore::new(client.clone())),
            Arc::new(PostgresCompanyStore::new(client)),
        ))
    }

    pub fn employee_service(&self) -> EmployeeService {
        EmployeeService::from_ref(self)
    }

    pub fn company_service(&self) -> CompanyService {
        CompanyService::from_ref(self)
    }
}
