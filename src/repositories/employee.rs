//! PostgreSQL employee store.

use async_trait::async_trait;

use crate::db::backends::postgres::PostgresClient;
use crate::db::{QueryExt, Row};
use crate::error::AppError;
use crate::models::{Employee, EmployeeStatus, PageRequest};
use crate::repositories::EmployeeStore;

const COLUMNS: &str = "id, name, age, gender, salary, company_id, active";

/// Employee store backed by the `employee` table.
#[derive(Clone)]
pub struct PostgresEmployeeStore {
    client: PostgresClient,
}

impl PostgresEmployeeStore {
    pub fn new(client: PostgresClient) -> Self {
        Self { client }
    }

    async fn fetch(
        &self,
        sql: &str,
        bind: Option<serde_json::Value>,
    ) -> Result<Vec<Employee>, AppError> {
        let mut query = self.client.query(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query.fetch_all().await?;
        rows.iter().map(Self::row_to_employee).collect()
    }

    async fn insert(&self, employee: &Employee) -> Result<Employee, AppError> {
        let row = self
            .client
            .query(&format!(
                "INSERT INTO employee (name, age, gender, salary, company_id, active)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING {COLUMNS}"
            ))
            .bind(&employee.name)
            .bind(employee.age)
            .bind(&employee.gender)
            .bind(employee.salary)
            .bind(employee.company_id)
            .bind(employee.status.as_bool())
            .fetch_one()
            .await?
            .ok_or_else(|| AppError::Internal("INSERT returned no row".to_string()))?;

        Self::row_to_employee(&row)
    }

    async fn update(&self, id: i64, employee: &Employee) -> Result<Employee, AppError> {
        let row = self
            .client
            .query(&format!(
                "UPDATE employee
                 SET name = $2, age = $3, gender = $4, salary = $5, company_id = $6, active = $7
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            ))
            .bind(id)
            .bind(&employee.name)
            .bind(employee.age)
            .bind(&employee.gender)
            .bind(employee.salary)
            .bind(employee.company_id)
            .bind(employee.status.as_bool())
            .fetch_one()
            .await?
            .ok_or(AppError::EmployeeNotFound(id))?;

        Self::row_to_employee(&row)
    }

    fn row_to_employee(row: &Row) -> Result<Employee, AppError> {
        let active: Option<bool> = row.get_opt("active")?;

        Ok(Employee {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            age: row.get("age")?,
            gender: row.get("gender")?,
            salary: row.get("salary")?,
            company_id: row.get_opt("company_id")?,
            status: EmployeeStatus::from(active),
        })
    }
}

#[async_trait]
impl EmployeeStore for PostgresEmployeeStore {
    async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        self.fetch(&format!("SELECT {COLUMNS} FROM employee ORDER BY id"), None)
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError> {
        let row = self
            .client
            .query(&format!("SELECT {COLUMNS} FROM employee WHERE id = $1"))
            .bind(id)
            .fetch_one()
            .await?;

        row.as_ref().map(Self::row_to_employee).transpose()
    }

    async fn find_all_by_gender(&self, gender: &str) -> Result<Vec<Employee>, AppError> {
        self.fetch(
            &format!("SELECT {COLUMNS} FROM employee WHERE gender = $1 ORDER BY id"),
            Some(gender.into()),
        )
        .await
    }

    async fn find_by_company_id(&self, company_id: i64) -> Result<Vec<Employee>, AppError> {
        self.fetch(
            &format!("SELECT {COLUMNS} FROM employee WHERE company_id = $1 ORDER BY id"),
            Some(company_id.into()),
        )
        .await
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Employee>, AppError> {
        let rows = self
            .client
            .query(&format!("SELECT {COLUMNS} FROM employee ORDER BY id LIMIT $1 OFFSET $2"))
            .bind(page.size())
            .bind(page.offset())
            .fetch_all()
            .await?;

        rows.iter().map(Self::row_to_employee).collect()
    }

    async fn save(&self, employee: Employee) -> Result<Employee, AppError> {
        match employee.id {
            None => self.insert(&employee).await,
            Some(id) => self.update(id, &employee).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .client
            .query("DELETE FROM employee WHERE id = $1")
            .bind(id)
            .execute()
            .await?;

        tracing::debug!(id, deleted, "Deleted employee rows");
        Ok(())
    }
}
