//! Migration trait and registry.

use futures::future::BoxFuture;

use crate::db::{DbClient, SqlExecutor, Transaction as _};
use crate::error::AppError;

/// A single schema migration.
///
/// Uses `BoxFuture` so `up` can borrow the executor without the `'static`
/// requirement `#[async_trait]` would add.
pub trait Migration: Send + Sync {
    fn id(&self) -> &'static str;
    fn version(&self) -> u32;
    fn description(&self) -> &'static str;
    fn up<'a>(&'a self, ctx: &'a (dyn SqlExecutor + Sync)) -> BoxFuture<'a, Result<(), AppError>>;
}

/// Ordered set of migrations.
#[derive(Default)]
pub struct Register {
    migrations: Vec<Box<dyn Migration>>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, migration: impl Migration + 'static) -> Self {
        self.migrations.push(Box::new(migration));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Migration> {
        self.migrations.iter().map(|m| m.as_ref())
    }

    /// Highest version known to this register.
    pub fn latest_version(&self) -> u32 {
        self.iter().map(|m| m.version()).max().unwrap_or(0)
    }

    /// Run all migrations above `current_version`, each in its own transaction.
    ///
    /// `on_applied` runs inside the migration's transaction, so the version
    /// bump commits or rolls back together with the schema change.
    /// Returns (new_version, applied_migration_ids).
    pub async fn run_pending<C>(
        &self,
        client: &C,
        current_version: u32,
    ) -> Result<(u32, Vec<String>), AppError>
    where
        C: DbClient + 'static,
        for<'a> C::Tx<'a>: 'static,
    {
        let mut applied = vec![];
        let mut new_version = current_version;

        for migration in &self.migrations {
            if migration.version() <= current_version {
                continue;
            }

            tracing::info!(
                "Applying migration {} (v{}): {}",
                migration.id(),
                migration.version(),
                migration.description()
            );

            let txn = client.begin().await?;
            let result = match migration.up(&txn).await {
                Ok(()) => record_version(&txn, migration.version(), migration.id()).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => txn.commit().await?,
                Err(e) => {
                    tracing::error!("Migration {} failed: {}", migration.id(), e);
                    txn.rollback().await?;
                    return Err(e);
                }
            }

            new_version = migration.version();
            applied.push(migration.id().to_string());
        }

        Ok((new_version, applied))
    }
}

async fn record_version(
    txn: &(dyn SqlExecutor + Sync),
    version: u32,
    migration_id: &str,
) -> Result<(), AppError> {
    txn.execute_sql(
        "UPDATE schema_version
         SET version = $1, applied_migrations = array_append(applied_migrations, $2), last_applied_at = NOW()
         WHERE id = 1",
        vec![version.into(), migration_id.into()],
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;

    use super::*;

    struct Noop(u32);

    impl Migration for Noop {
        fn id(&self) -> &'static str {
            "noop"
        }

        fn version(&self) -> u32 {
            self.0
        }

        fn description(&self) -> &'static str {
            "Does nothing"
        }

        fn up<'a>(
            &'a self,
            _ctx: &'a (dyn SqlExecutor + Sync),
        ) -> BoxFuture<'a, Result<(), AppError>> {
            async { Ok(()) }.boxed()
        }
    }

    #[test]
    fn test_latest_version() {
        assert_eq!(Register::new().latest_version(), 0);

        let register = Register::new().register(Noop(1)).register(Noop(3));
        assert_eq!(register.latest_version(), 3);
        assert_eq!(
            register.iter().map(|m| m.version()).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_shipped_register_is_ordered() {
        let register = crate::migrations::create_register();
        let versions: Vec<_> = register.iter().map(|m| m.version()).collect();

        assert!(versions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(register.latest_version(), 1);
    }
}
