//! Migration: Create the invoicing tables, indexes, and status enums.
//!
//! Statements come from [`crate::schema::ddl`], so the installed schema is
//! exactly what the descriptors declare.

use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

use crate::schema::{ddl, ENUMS, TABLES};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        // Enum types must exist before the columns that use them
        if backend == DbBackend::Postgres {
            for descriptor in ENUMS.iter() {
                manager.create_type(ddl::create_enum(descriptor)).await?;
            }
        }

        for table in TABLES.iter() {
            manager.create_table(ddl::create_table(table, backend)).await?;
            for index in ddl::create_indexes(table) {
                manager.create_index(index).await?;
            }
            tracing::debug!(table = table.name, "Created table");
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first; indexes go with their tables
        for table in TABLES.iter().rev() {
            manager.drop_table(ddl::drop_table(table)).await?;
        }

        if manager.get_database_backend() == DbBackend::Postgres {
            for descriptor in ENUMS.iter() {
                manager.drop_type(ddl::drop_enum(descriptor)).await?;
            }
        }

        Ok(())
    }
}
