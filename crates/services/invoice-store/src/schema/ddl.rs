//! DDL statements built from the schema descriptors.
//!
//! PostgreSQL gets native enum types and server-side UUID defaults. Other
//! backends store enum columns as `varchar` guarded by a `CHECK` over the
//! closed value set, and rely on the application for ids.

use sea_orm::sea_query::extension::postgres::{Type, TypeCreateStatement, TypeDropStatement};
use sea_orm::sea_query::{
    Alias, ColumnDef, Expr, ForeignKey as ForeignKeyStatement, ForeignKeyAction, Index,
    IndexCreateStatement, PostgresQueryBuilder, Table, TableCreateStatement, TableDropStatement,
};
use sea_orm::DbBackend;

use super::{
    ColumnDefault, ColumnDescriptor, ColumnKind, DeleteRule, EnumDescriptor, TableDescriptor,
    ENUMS, TABLES,
};

/// Width of the `varchar` standing in for an enum type outside PostgreSQL
pub const ENUM_FALLBACK_LENGTH: u32 = 32;

/// `CREATE TYPE .. AS ENUM (..)`
pub fn create_enum(descriptor: &EnumDescriptor) -> TypeCreateStatement {
    Type::create()
        .as_enum(Alias::new(descriptor.name))
        .values(descriptor.values.iter().map(|v| Alias::new(*v)))
        .to_owned()
}

pub fn drop_enum(descriptor: &EnumDescriptor) -> TypeDropStatement {
    Type::drop()
        .if_exists()
        .name(Alias::new(descriptor.name))
        .to_owned()
}

/// `CREATE TABLE` with columns, primary key, uniqueness, defaults, and
/// foreign keys inline.
pub fn create_table(table: &TableDescriptor, backend: DbBackend) -> TableCreateStatement {
    let mut stmt = Table::create();
    stmt.table(Alias::new(table.name)).if_not_exists();

    for column in table.columns {
        stmt.col(&mut column_def(column, backend));
    }

    for (column, fk) in table.foreign_keys() {
        stmt.foreign_key(
            ForeignKeyStatement::create()
                .name(foreign_key_name(table.name, column.name))
                .from(Alias::new(table.name), Alias::new(column.name))
                .to(Alias::new(fk.table), Alias::new(fk.column))
                .on_delete(delete_action(fk.on_delete)),
        );
    }

    stmt
}

pub fn drop_table(table: &TableDescriptor) -> TableDropStatement {
    Table::drop()
        .table(Alias::new(table.name))
        .if_exists()
        .to_owned()
}

/// `CREATE INDEX` for every declared index of `table`.
pub fn create_indexes(table: &TableDescriptor) -> Vec<IndexCreateStatement> {
    table
        .indexes
        .iter()
        .map(|index| {
            let mut stmt = Index::create();
            stmt.name(index.name)
                .table(Alias::new(table.name))
                .if_not_exists();
            for column in index.columns {
                stmt.col(Alias::new(*column));
            }
            if index.unique {
                stmt.unique();
            }
            stmt
        })
        .collect()
}

/// Name of the constraint on `table.column`, e.g. `fk_invoices_project_id`.
pub fn foreign_key_name(table: &str, column: &str) -> String {
    format!("fk_{}_{}", table, column)
}

/// The full PostgreSQL schema as SQL text, in execution order.
pub fn postgres_script() -> Vec<String> {
    let mut script: Vec<String> = ENUMS
        .iter()
        .map(|e| create_enum(e).to_string(PostgresQueryBuilder))
        .collect();

    for table in TABLES.iter() {
        script.push(create_table(table, DbBackend::Postgres).to_string(PostgresQueryBuilder));
        script.extend(
            create_indexes(table)
                .iter()
                .map(|index| index.to_string(PostgresQueryBuilder)),
        );
    }

    script
}

fn column_def(column: &ColumnDescriptor, backend: DbBackend) -> ColumnDef {
    let mut def = ColumnDef::new(Alias::new(column.name));

    match column.kind {
        ColumnKind::Uuid => def.uuid(),
        ColumnKind::Varchar(len) => def.string_len(len),
        ColumnKind::Text => def.text(),
        ColumnKind::Timestamp => def.timestamp(),
        ColumnKind::Date => def.date(),
        ColumnKind::Decimal(spec) => def.decimal_len(spec.precision, spec.scale),
        ColumnKind::Boolean => def.boolean(),
        ColumnKind::Integer => def.integer(),
        ColumnKind::Enum(e) if backend == DbBackend::Postgres => def.custom(Alias::new(e.name)),
        ColumnKind::Enum(e) => def
            .string_len(ENUM_FALLBACK_LENGTH)
            .check(Expr::col(Alias::new(column.name)).is_in(e.values.iter().copied())),
    };

    if column.primary_key {
        def.primary_key();
    }
    if column.nullable {
        def.null();
    } else {
        def.not_null();
    }
    if column.unique {
        def.unique_key();
    }

    match column.default {
        Some(ColumnDefault::RandomUuid) if backend == DbBackend::Postgres => {
            def.default(Expr::cust("gen_random_uuid()"));
        }
        Some(ColumnDefault::RandomUuid) | None => {}
        Some(ColumnDefault::Now) => {
            def.default(Expr::current_timestamp());
        }
        Some(ColumnDefault::Text(value)) => {
            def.default(value);
        }
        Some(ColumnDefault::Bool(value)) => {
            def.default(value);
        }
        Some(ColumnDefault::Integer(value)) => {
            def.default(value);
        }
        Some(ColumnDefault::Decimal(literal)) => {
            def.default(Expr::cust(literal));
        }
    }

    def
}

fn delete_action(rule: DeleteRule) -> ForeignKeyAction {
    match rule {
        DeleteRule::Cascade => ForeignKeyAction::Cascade,
        DeleteRule::SetNull => ForeignKeyAction::SetNull,
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::sea_query::SqliteQueryBuilder;

    use super::*;
    use crate::schema::{INVOICES, INVOICE_STATUS, PROJECTS, USERS};

    fn pg(table: &TableDescriptor) -> String {
        create_table(table, DbBackend::Postgres).to_string(PostgresQueryBuilder)
    }

    #[test]
    fn test_enum_type_lists_every_value() {
        let sql = create_enum(&INVOICE_STATUS).to_string(PostgresQueryBuilder);

        assert!(sql.starts_with("CREATE TYPE \"invoice_status\" AS ENUM"));
        for value in INVOICE_STATUS.values {
            assert!(sql.contains(&format!("'{}'", value)), "{sql}");
        }
    }

    #[test]
    fn test_invoice_table_carries_delete_rules() {
        let sql = pg(&INVOICES);

        assert!(sql.contains("\"fk_invoices_user_id\""), "{sql}");
        assert!(sql.contains("ON DELETE CASCADE"), "{sql}");
        assert!(sql.contains("ON DELETE SET NULL"), "{sql}");
        assert_eq!(sql.matches("FOREIGN KEY").count(), 3, "{sql}");
    }

    #[test]
    fn test_invoice_table_uses_fixed_precision() {
        let sql = pg(&INVOICES);

        assert!(sql.contains("\"subtotal\" decimal(12, 2) NOT NULL"), "{sql}");
        assert!(sql.contains("\"tax_rate\" decimal(5, 2) NULL DEFAULT 0"), "{sql}");
        assert!(sql.contains("\"status\" invoice_status NULL DEFAULT 'draft'"), "{sql}");
    }

    #[test]
    fn test_postgres_ids_default_to_random_uuid() {
        let sql = pg(&USERS);

        assert!(sql.contains("gen_random_uuid()"), "{sql}");
        assert!(sql.contains("DEFAULT 'NGN'"), "{sql}");
        assert!(sql.contains("UNIQUE"), "{sql}");
    }

    #[test]
    fn test_sqlite_enum_falls_back_to_checked_text() {
        let sql = create_table(&PROJECTS, DbBackend::Sqlite).to_string(SqliteQueryBuilder);

        assert!(!sql.contains("project_status"), "{sql}");
        assert!(!sql.contains("gen_random_uuid"), "{sql}");
        assert!(sql.contains("CHECK"), "{sql}");
        assert!(sql.contains("'on_hold'"), "{sql}");
    }

    #[test]
    fn test_unique_invoice_number_index() {
        let indexes: Vec<String> = create_indexes(&INVOICES)
            .iter()
            .map(|i| i.to_string(PostgresQueryBuilder))
            .collect();

        assert_eq!(indexes.len(), 4);
        let unique = indexes
            .iter()
            .find(|sql| sql.contains("invoices_number_user_unique_idx"))
            .unwrap();
        assert!(unique.starts_with("CREATE UNIQUE INDEX"), "{unique}");
        assert!(unique.contains("(\"user_id\", \"invoice_number\")"), "{unique}");
    }

    #[test]
    fn test_script_creates_types_before_tables() {
        let script = postgres_script();

        assert!(script[0].starts_with("CREATE TYPE"));
        assert!(script[1].starts_with("CREATE TYPE"));
        assert!(script[2].contains("\"users\""));
        let tables = script.iter().filter(|s| s.starts_with("CREATE TABLE")).count();
        assert_eq!(tables, 7);
    }
}
