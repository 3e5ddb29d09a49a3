//! Migration runner with version tracking.

use crate::db::{DbClient, QueryExt, Row};
use crate::error::AppError;
use crate::migrations::create_register;

/// Result of running migrations.
#[derive(Debug, Clone)]
pub struct MigrationResult {
    /// Schema version before migrations ran.
    pub previous_version: u32,
    /// Schema version after migrations ran.
    pub current_version: u32,
    /// Highest version this binary knows about.
    pub latest_version: u32,
    /// IDs of the migrations applied by this run.
    pub applied_migrations: Vec<String>,
    /// IDs of every migration ever applied, oldest first.
    pub history: Vec<String>,
    /// RFC 3339 timestamp of the last version bump.
    pub last_applied_at: Option<String>,
}

impl MigrationResult {
    /// The database was migrated by a newer binary.
    pub fn is_ahead(&self) -> bool {
        self.current_version > self.latest_version
    }
}

/// Contents of the single `schema_version` row.
#[derive(Debug, Clone, Default)]
struct SchemaState {
    version: u32,
    applied_migrations: Vec<String>,
    last_applied_at: Option<String>,
}

impl SchemaState {
    fn from_row(row: &Row) -> Result<Self, AppError> {
        let version: i64 = row.get("version")?;
        Ok(Self {
            version: version as u32,
            applied_migrations: row.get_opt("applied_migrations")?.unwrap_or_default(),
            last_applied_at: row.get_opt("last_applied_at")?,
        })
    }
}

const CREATE_SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY DEFAULT 1 CHECK (id = 1),
    version INTEGER NOT NULL DEFAULT 0,
    applied_migrations TEXT[] NOT NULL DEFAULT '{}',
    last_applied_at TIMESTAMPTZ DEFAULT NOW()
);
INSERT INTO schema_version (id, version) VALUES (1, 0) ON CONFLICT (id) DO NOTHING;
"#;

/// Run all pending migrations.
pub async fn run_migrations<C>(client: &C) -> Result<MigrationResult, AppError>
where
    C: DbClient + 'static,
    for<'a> C::Tx<'a>: 'static,
{
    client.batch_execute(CREATE_SCHEMA_VERSION_TABLE).await?;

    let previous_version = get_schema_state(client).await?.version;
    let register = create_register();
    let (current_version, applied_migrations) =
        register.run_pending(client, previous_version).await?;
    let state = get_schema_state(client).await?;

    Ok(MigrationResult {
        previous_version,
        current_version,
        latest_version: register.latest_version(),
        applied_migrations,
        history: state.applied_migrations,
        last_applied_at: state.last_applied_at,
    })
}

async fn get_schema_state<C: DbClient>(client: &C) -> Result<SchemaState, AppError> {
    client
        .query(
            "SELECT version::BIGINT AS version, applied_migrations, last_applied_at
             FROM schema_version WHERE id = 1",
        )
        .fetch_one()
        .await?
        .map(|row| SchemaState::from_row(&row))
        .transpose()
        .map(Option::unwrap_or_default)
}
