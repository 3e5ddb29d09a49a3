//! Initial schema: company and employee tables.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::db::SqlExecutor;
use crate::error::AppError;
use crate::migrations::Migration;

/// Company and employee tables.
///
/// `employee.company_id` is a plain indexed column: deleting a company
/// never cascades, and references are not checked.
pub struct M001Schema;

impl Migration for M001Schema {
    fn id(&self) -> &'static str {
        "m001_schema"
    }

    fn version(&self) -> u32 {
        1
    }

    fn description(&self) -> &'static str {
        "Company and employee tables"
    }

    fn up<'a>(&'a self, ctx: &'a (dyn SqlExecutor + Sync)) -> BoxFuture<'a, Result<(), AppError>> {
        async move {
            ctx.batch_execute(
                r#"
                CREATE TABLE IF NOT EXISTS company (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS employee (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    age INTEGER NOT NULL,
                    gender TEXT NOT NULL,
                    salary INTEGER NOT NULL,
                    company_id BIGINT,
                    active BOOLEAN
                );

                CREATE INDEX IF NOT EXISTS employee_gender_idx ON employee (gender);
                CREATE INDEX IF NOT EXISTS employee_company_id_idx ON employee (company_id);
                "#,
            )
            .await
        }
        .boxed()
    }
}
