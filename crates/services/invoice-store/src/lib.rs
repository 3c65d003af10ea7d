//! Invoice Store Library
//!
//! Persistence layer for the invoicing data model: schema descriptors, SeaORM
//! entities, and the migration that installs the schema.

pub mod entities;
pub mod infra;
pub mod schema;

use common::{AppError, AppResult, Settings};
use tracing::info;

use crate::infra::Database;

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction, settings: &Settings) -> AppResult<()> {
    let db = Database::connect_without_migrations(settings).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// PostgreSQL DDL for the whole schema, one statement per line.
pub fn schema_sql() -> String {
    schema::ddl::postgres_script()
        .into_iter()
        .map(|statement| format!("{};", statement))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Loaded settings as pretty JSON, without the database URL.
pub fn settings_report(settings: &Settings) -> AppResult<String> {
    serde_json::to_string_pretty(settings).map_err(|e| AppError::internal(e.to_string()))
}
