//! Company subcommands.

use clap::Subcommand;
use color_eyre::Result;

use crate::context::Context;
use crate::models::{Company, CompanyPatch};

use super::print_json;

/// Company subcommands.
#[derive(Subcommand)]
pub enum CompanyCommand {
    /// List companies, optionally paged
    List {
        /// Page number, starting at 1
        #[arg(long, requires = "size")]
        page: Option<u32>,

        /// Page size
        #[arg(long, requires = "page")]
        size: Option<u32>,
    },

    /// Show one company
    Get { id: i64 },

    /// Register a new company
    Create {
        #[arg(long)]
        name: String,
    },

    /// Rename a company
    Update {
        id: i64,

        #[arg(long)]
        name: String,
    },

    /// List the employees referencing a company
    Employees { id: i64 },

    /// Remove a company record (employees keep their reference)
    Delete { id: i64 },
}

impl CompanyCommand {
    /// Run the company subcommand.
    pub async fn run(&self, ctx: &Context) -> Result<()> {
        let service = ctx.company_service();

        match self {
            CompanyCommand::List { page, size } => {
                let companies = match (page, size) {
                    (Some(page), Some(size)) => service.find_by_page(*page, *size).await?,
                    _ => service.find_all().await?,
                };
                print_json(&companies)
            }
            CompanyCommand::Get { id } => print_json(&service.find_by_id(*id).await?),
            CompanyCommand::Create { name } => {
                print_json(&service.create(Company::new(name.as_str())).await?)
            }
            CompanyCommand::Update { id, name } => {
                print_json(&service.update(*id, CompanyPatch::new(name.as_str())).await?)
            }
            CompanyCommand::Employees { id } => {
                print_json(&service.find_employees_by_company_id(*id).await?)
            }
            CompanyCommand::Delete { id } => {
                service.delete(*id).await?;
                tracing::info!("Deleted company {}", id);
                Ok(())
            }
        }
    }
}
