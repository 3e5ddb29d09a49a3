//! PostgreSQL company store.

use async_trait::async_trait;

use crate::db::backends::postgres::PostgresClient;
use crate::db::{QueryExt, Row};
use crate::error::AppError;
use crate::models::{Company, PageRequest};
use crate::repositories::CompanyStore;

/// Company store backed by the `company` table.
#[derive(Clone)]
pub struct PostgresCompanyStore {
    client: PostgresClient,
}

impl PostgresCompanyStore {
    pub fn new(client: PostgresClient) -> Self {
        Self { client }
    }

    fn row_to_company(row: &Row) -> Result<Company, AppError> {
        Ok(Company {
            id: Some(row.get("id")?),
            name: row.get("name")?,
        })
    }
}

#[async_trait]
impl CompanyStore for PostgresCompanyStore {
    async fn find_all(&self) -> Result<Vec<Company>, AppError> {
        let rows = self
            .client
            .query("SELECT id, name FROM company ORDER BY id")
            .fetch_all()
            .await?;

        rows.iter().map(Self::row_to_company).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        let row = self
            .client
            .query("SELECT id, name FROM company WHERE id = $1")
            .bind(id)
            .fetch_one()
            .await?;

        row.as_ref().map(Self::row_to_company).transpose()
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Company>, AppError> {
        let rows = self
            .client
            .query("SELECT id, name FROM company ORDER BY id LIMIT $1 OFFSET $2")
            .bind(page.size())
            .bind(page.offset())
            .fetch_all()
            .await?;

        rows.iter().map(Self::row_to_company).collect()
    }

    async fn save(&self, company: Company) -> Result<Company, AppError> {
        let row = match company.id {
            None => self
                .client
                .query("INSERT INTO company (name) VALUES ($1) RETURNING id, name")
                .bind(&company.name)
                .fetch_one()
                .await?
                .ok_or_else(|| AppError::Internal("INSERT returned no row".to_string()))?,
            Some(id) => self
                .client
                .query("UPDATE company SET name = $2 WHERE id = $1 RETURNING id, name")
                .bind(id)
                .bind(&company.name)
                .fetch_one()
                .await?
                .ok_or(AppError::CompanyNotFound(id))?,
        };

        Self::row_to_company(&row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .client
            .query("DELETE FROM company WHERE id = $1")
            .bind(id)
            .execute()
            .await?;

        tracing::debug!(id, deleted, "Deleted company rows");
        Ok(())
    }
}
