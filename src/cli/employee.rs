//! Employee subcommands.

use clap::Subcommand;
use color_eyre::Result;

use crate::context::Context;
use crate::models::{Employee, EmployeePatch};

use super::print_json;

/// Employee subcommands.
#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// List employees, optionally filtered by gender or paged
    List {
        /// Only employees with exactly this gender
        #[arg(long, conflicts_with_all = ["page", "size"])]
        gender: Option<String>,

        /// Page number, starting at 1
        #[arg(long, requires = "size")]
        page: Option<u32>,

        /// Page size
        #[arg(long, requires = "page")]
        size: Option<u32>,
    },

    /// Show one employee
    Get { id: i64 },

    /// Hire a new employee (always stored active)
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: i32,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        salary: i32,

        #[arg(long)]
        company_id: Option<i64>,
    },

    /// Change age and/or salary of an active employee
    Update {
        id: i64,

        #[arg(long)]
        age: Option<i32>,

        #[arg(long)]
        salary: Option<i32>,
    },

    /// Remove an employee record
    Delete { id: i64 },
}

impl EmployeeCommand {
    /// Run the employee subcommand.
    pub async fn run(&self, ctx: &Context) -> Result<()> {
        let service = ctx.employee_service();

        match self {
            EmployeeCommand::List { gender, page, size } => {
                let employees = match (gender, page, size) {
                    (Some(gender), _, _) => service.find_all_by_gender(gender).await?,
                    (None, Some(page), Some(size)) => service.find_by_page(*page, *size).await?,
                    _ => service.find_all().await?,
                };
                print_json(&employees)
            }
            EmployeeCommand::Get { id } => print_json(&service.find_by_id(*id).await?),
            EmployeeCommand::Create {
                name,
                age,
                gender,
                salary,
                company_id,
            } => {
                let mut employee = Employee::new(name.as_str(), *age, gender.as_str(), *salary);
                employee.company_id = *company_id;
                print_json(&service.create(employee).await?)
            }
            EmployeeCommand::Update { id, age, salary } => {
                let patch = EmployeePatch {
                    age: *age,
                    salary: *salary,
                };
                print_json(&service.update(*id, patch).await?)
            }
            EmployeeCommand::Delete { id } => {
                service.delete(*id).await?;
                tracing::info!("Deleted employee {}", id);
                Ok(())
            }
        }
    }
}
