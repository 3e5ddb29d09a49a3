//! Recording store doubles for service tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Company, Employee, PageRequest};
use crate::repositories::{CompanyStore, EmployeeStore};

/// A store operation observed by a mock.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    FindAll,
    FindById(i64),
    FindAllByGender(String),
    FindByCompanyId(i64),
    FindPage(PageRequest),
    Save,
    DeleteById(i64),
}

pub trait Keyed: Clone {
    fn key(&self) -> Option<i64>;
    fn set_key(&mut self, id: i64);
}

impl Keyed for Employee {
    fn key(&self) -> Option<i64> {
        self.id
    }

    fn set_key(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl Keyed for Company {
    fn key(&self) -> Option<i64> {
        self.id
    }

    fn set_key(&mut self, id: i64) {
        self.id = Some(id);
    }
}

/// Store double that serves canned records and records every call.
///
/// `save` assigns ids sequentially from 1 and keeps a copy of each argument.
pub struct MockStore<T> {
    records: Mutex<Vec<T>>,
    calls: Mutex<Vec<StoreCall>>,
    saved: Mutex<Vec<T>>,
}

pub type MockEmployeeStore = MockStore<Employee>;
pub type MockCompanyStore = MockStore<Company>;

impl<T> Default for MockStore<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Keyed> MockStore<T> {
    pub fn with(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments passed to `save`, as received.
    pub fn saved(&self) -> Vec<T> {
        self.saved.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn all(&self) -> Vec<T> {
        self.records.lock().unwrap().clone()
    }

    fn matching(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.all().into_iter().filter(|r| predicate(r)).collect()
    }

    fn by_id(&self, id: i64) -> Option<T> {
        self.matching(|r| r.key() == Some(id)).into_iter().next()
    }

    fn page(&self, page: PageRequest) -> Vec<T> {
        self.all()
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .collect()
    }

    fn store(&self, record: T) -> T {
        self.saved.lock().unwrap().push(record.clone());

        let mut records = self.records.lock().unwrap();
        let mut record = record;
        match record.key() {
            Some(id) => {
                records.retain(|r| r.key() != Some(id));
            }
            None => {
                let next = records.iter().filter_map(Keyed::key).max().unwrap_or(0) + 1;
                record.set_key(next);
            }
        }
        records.push(record.clone());
        record
    }
}

#[async_trait]
impl EmployeeStore for MockStore<Employee> {
    async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        self.record(StoreCall::FindAll);
        Ok(self.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError> {
        self.record(StoreCall::FindById(id));
        Ok(self.by_id(id))
    }

    async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, AppError> {
        self.record(StoreCall::FindAllByGender(gender.to_string()));
        Ok(self.matching(|e| e.gender == gender))
    }

    async fn find_by_company_id(&self, company_id: i64) -> Result<Vec<Employee>, AppError> {
        self.record(StoreCall::FindByCompanyId(company_id));
        Ok(self.matching(|e| e.company_id == Some(company_id)))
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Employee>, AppError> {
        self.record(StoreCall::FindPage(page));
        Ok(self.page(page))
    }

    async fn save(&self, employee: Employee) -> Result<Employee, AppError> {
        self.record(StoreCall::Save);
        Ok(self.store(employee))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.record(StoreCall::DeleteById(id));
        Ok(())
    }
}

#[async_trait]
impl CompanyStore for MockStore<Company> {
    async fn find_all(&self) -> Result<Vec<Company>, AppError> {
        self.record(StoreCall::FindAll);
        Ok(self.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        self.record(StoreCall::FindById(id));
        Ok(self.by_id(id))
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Company>, AppError> {
        self.record(StoreCall::FindPage(page));
        Ok(self.page(page))
    }

    async fn save(&self, company: Company) -> Result<Company, AppError> {
        self.record(StoreCall::Save);
        Ok(self.store(company))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.record(StoreCall::DeleteById(id));
        Ok(())
    }
}
