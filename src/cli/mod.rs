//! CLI module for Workforce.
//!
//! Subcommands:
//! - `init`: Initialize the database schema
//! - `employee`: Employee records
//! - `company`: Company records

mod company;
mod employee;
mod init;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use serde::Serialize;

use crate::config::Config;
use crate::context::Context;

pub use company::CompanyCommand;
pub use employee::EmployeeCommand;

/// Workforce - Employee and company records
#[derive(Parser)]
#[command(name = "workforce")]
#[command(about = "Employee and company records backed by PostgreSQL")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize the database schema
    Init,

    /// Manage employees
    Employee {
        #[command(subcommand)]
        command: EmployeeCommand,
    },

    /// Manage companies
    Company {
        #[command(subcommand)]
        command: CompanyCommand,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Init => self.run_init().await,
            Command::Employee { ref command } => command.run(&connect().await?).await,
            Command::Company { ref command } => command.run(&connect().await?).await,
        }
    }
}

/// Load configuration and build a PostgreSQL-backed context.
async fn connect() -> Result<Context> {
    let config = Config::load()?;
    tracing::debug!("Connecting to PostgreSQL at {}", config.postgres.uri);
    let ctx = Context::from_config(&config)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to connect: {}", e))?;
    Ok(ctx)
}

/// Print a value to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
