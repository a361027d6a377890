//! Migrate command - Schema maintenance without starting the server.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config.database_url).await?;

    let outcome = match args.action {
        MigrateAction::Up => db.migrate_up().await,
        MigrateAction::Down { steps } => db.migrate_down(steps).await,
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before migrating");
            db.reset().await
        }
        MigrateAction::Status => {
            for state in db.migrations().await? {
                let mark = if state.applied { "x" } else { " " };
                println!("[{}] {}", mark, state.name);
            }
            return Ok(());
        }
    };

    outcome.map_err(|e| AppError::internal(format!("Migration failed: {}", e)))?;
    tracing::info!(action = ?args.action, "Migration finished");
    Ok(())
}
