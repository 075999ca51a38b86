//! `migrate`: apply, preview or revert the embedded migrations.

use crate::config::settings::Settings;
use crate::db;
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// `dry_run` lists pending migrations; `rollback` reverts that many.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            let pending = db::pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                print_list(&pending);
                println!("Run without --dry-run to apply them");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            println!("Rolling back {steps} migration(s)...");
            let reverted = db::revert_migrations(url, steps).await?;
            println!("✓ Rolled back {} migration(s):", reverted.len());
            print_list(&reverted);
            return Ok(());
        }

        println!("Running database migrations...");
        let applied = db::run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            print_list(&applied);
        }
        Ok(())
    }
}

fn print_list(names: &[String]) {
    for name in names {
        println!("  - {name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_missing_database_url_fails_before_connecting() {
        let handler = MigrateCommandHandler::new(Settings::default());
        assert!(matches!(
            handler.execute(true, None).await,
            Err(AppError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_zero_rollback_steps_is_rejected() {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/marketplace".to_string();
        let handler = MigrateCommandHandler::new(config);

        let result = handler.execute(false, Some(0)).await;
        assert!(matches!(
            result,
            Err(AppError::Validation { ref field, .. }) if field == "rollback_steps"
        ));
    }
}
