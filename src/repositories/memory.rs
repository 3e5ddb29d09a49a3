//! In-memory stores.
//!
//! Records live in an id-ordered map behind a `tokio::sync::RwLock`; ids
//! come from a per-store sequence starting at 1. Clones share the same data.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{Company, Employee, PageRequest};
use crate::repositories::{CompanyStore, EmployeeStore};

/// A record with a store-assigned id.
trait Record: Clone {
    fn id(&self) -> Option<i64>;
    fn assign_id(&mut self, id: i64);
}

impl Record for Employee {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl Record for Company {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Record> Table<T> {
    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| predicate(*r)).cloned().collect()
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn page(&self, page: PageRequest) -> Vec<T> {
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        self.rows
            .values()
            .skip(skip)
            .take(page.size() as usize)
            .cloned()
            .collect()
    }

    /// Inserts or replaces; `None` is returned for an update of an unknown id.
    fn save(&mut self, mut record: T) -> Option<T> {
        let id = match record.id() {
            Some(id) if !self.rows.contains_key(&id) => return None,
            Some(id) => id,
            None => {
                self.last_id += 1;
                record.assign_id(self.last_id);
                self.last_id
            }
        };
        self.rows.insert(id, record.clone());
        Some(record)
    }

    fn remove(&mut self, id: i64) {
        self.rows.remove(&id);
    }
}

/// Employee store holding records in memory.
#[derive(Clone, Default)]
pub struct InMemoryEmployeeStore {
    table: Arc<RwLock<Table<Employee>>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.table.read().await.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError> {
        Ok(self.table.read().await.get(id))
    }

    async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, AppError> {
        Ok(self.table.read().await.filter(|e| e.gender == gender))
    }

    async fn find_by_company_id(&self, company_id: i64) -> Result<Vec<Employee>, AppError> {
        Ok(self
            .table
            .read()
            .await
            .filter(|e| e.company_id == Some(company_id)))
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Employee>, AppError> {
        Ok(self.table.read().await.page(page))
    }

    async fn save(&self, employee: Employee) -> Result<Employee, AppError> {
        let id = employee.id;
        self.table
            .write()
            .await
            .save(employee)
            .ok_or_else(|| AppError::EmployeeNotFound(id.unwrap_or_default()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.table.write().await.remove(id);
        Ok(())
    }
}

/// Company store holding records in memory.
#[derive(Clone, Default)]
pub struct InMemoryCompanyStore {
    table: Arc<RwLock<Table<Company>>>,
}

impl InMemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn find_all(&self) -> Result<Vec<Company>, AppError> {
        Ok(self.table.read().await.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        Ok(self.table.read().await.get(id))
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Company>, AppError> {
        Ok(self.table.read().await.page(page))
    }

    async fn save(&self, company: Company) -> Result<Company, AppError> {
        let id = company.id;
        self.table
            .write()
            .await
            .save(company)
            .ok_or_else(|| AppError::CompanyNotFound(id.unwrap_or_default()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.table.write().await.remove(id);
        Ok(())
    }
}
