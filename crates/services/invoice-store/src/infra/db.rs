//! Database connection and initialization.

use common::Settings;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;

use super::migrations::Migrator;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect with the pool and TLS options from `settings`, then apply
    /// pending migrations.
    pub async fn connect(settings: &Settings) -> Result<Self, DbErr> {
        let db = Self::connect_with(connect_options(settings)).await?;
        db.run_migrations().await?;
        tracing::info!("Database connected and migrations applied");
        Ok(db)
    }

    /// Connect to `database_url` as given and apply pending migrations.
    pub async fn connect_url(database_url: &str) -> Result<Self, DbErr> {
        let db = Self::connect_with(ConnectOptions::new(database_url)).await?;
        db.run_migrations().await?;
        tracing::info!("Database connected and migrations applied");
        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(settings: &Settings) -> Result<Self, DbErr> {
        Self::connect_with(connect_options(settings)).await
    }

    pub async fn connect_with(options: ConnectOptions) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(options).await?;
        tracing::debug!(
            backend = ?connection.get_database_backend(),
            "Database connection established"
        );
        Ok(Self { connection })
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        // Creates the bookkeeping table on a blank database
        Migrator::install(&self.connection).await?;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Drop every table and enum type, then run all migrations.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

/// Pool options derived from settings.
pub fn connect_options(settings: &Settings) -> ConnectOptions {
    let options = &settings.database;
    let mut connect = ConnectOptions::new(connection_url(settings.database_url(), options.tls));
    connect
        .max_connections(options.max_connections)
        .min_connections(options.min_connections)
        .sqlx_logging(false);
    connect
}

/// `url` with `sslmode=require` appended for PostgreSQL when TLS is wanted
/// and the URL does not already choose a mode.
pub fn connection_url(url: &str, tls: bool) -> String {
    let postgres = url.starts_with("postgres://") || url.starts_with("postgresql://");
    if !tls || !postgres || url.contains("sslmode=") {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}sslmode=require", url, separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tls_appends_sslmode() {
        assert_eq!(
            connection_url("postgres://app@db/invoicing", true),
            "postgres://app@db/invoicing?sslmode=require"
        );
        assert_eq!(
            connection_url("postgresql://app@db/invoicing?application_name=store", true),
            "postgresql://app@db/invoicing?application_name=store&sslmode=require"
        );
    }

    #[test]
    fn test_explicit_sslmode_is_kept() {
        let url = "postgres://app@db/invoicing?sslmode=disable";
        assert_eq!(connection_url(url, true), url);
    }

    #[test]
    fn test_tls_off_or_other_backend_untouched() {
        assert_eq!(
            connection_url("postgres://app@db/invoicing", false),
            "postgres://app@db/invoicing"
        );
        assert_eq!(connection_url("sqlite::memory:", true), "sqlite::memory:");
    }

    #[test]
    fn test_connect_options_follow_settings() {
        let settings = Settings::from_lookup(|key| {
            match key {
                "NODE_ENV" => Some("test"),
                "APP_ORIGIN" => Some("http://localhost"),
                "PORT" => Some("8000"),
                "BASE_PATH" => Some("/api"),
                "DATABASE_URL" => Some("postgres://app@db/invoicing"),
                "DATABASE_MAX_CONNECTIONS" => Some("4"),
                "DATABASE_MIN_CONNECTIONS" => Some("2"),
                _ => None,
            }
            .map(str::to_string)
        })
        .unwrap();

        let options = connect_options(&settings);
        assert_eq!(options.get_url(), "postgres://app@db/invoicing?sslmode=require");
        assert_eq!(options.get_max_connections(), Some(4));
        assert_eq!(options.get_min_connections(), Some(2));
    }
}
