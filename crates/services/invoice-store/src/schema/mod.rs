//! Declarative schema descriptors.
//!
//! Every table, column, foreign key, index, and enumeration of the invoicing
//! data model is described here as static data. The migration builds its DDL
//! from these descriptors (see [`ddl`]) and the SeaORM entities in
//! [`crate::entities`] mirror them for query building.

pub mod ddl;
mod tables;

use domain::DecimalSpec;

pub use tables::{
    CUSTOMERS, ENUMS, INVOICES, INVOICE_LINE_ITEMS, INVOICE_STATUS, PAYMENTS, PROJECTS,
    PROJECT_STATUS, TABLES, TIME_ENTRIES, USERS,
};

/// Closed set of string values stored as a database enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

impl EnumDescriptor {
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }
}

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Uuid,
    Varchar(u32),
    Text,
    /// Date and time without zone, stored as UTC
    Timestamp,
    /// Calendar date with no time component
    Date,
    Decimal(DecimalSpec),
    Boolean,
    Integer,
    Enum(&'static EnumDescriptor),
}

/// Value a column takes when an insert omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    /// Random UUID generated by the database
    RandomUuid,
    /// Current timestamp at insert
    Now,
    Text(&'static str),
    Bool(bool),
    Integer(i32),
    /// Decimal literal, e.g. `"0"`
    Decimal(&'static str),
}

/// What happens to a referencing row when its parent is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRule {
    Cascade,
    SetNull,
}

/// Target of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: DeleteRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub default: Option<ColumnDefault>,
    pub references: Option<ForeignKey>,
}

impl ColumnDescriptor {
    /// A nullable column with no default.
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
            unique: false,
            primary_key: false,
            default: None,
            references: None,
        }
    }

    pub const fn not_null(self) -> Self {
        Self {
            nullable: false,
            ..self
        }
    }

    pub const fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    pub const fn primary_key(self) -> Self {
        Self {
            primary_key: true,
            nullable: false,
            ..self
        }
    }

    pub const fn default(self, default: ColumnDefault) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn references(
        self,
        table: &'static str,
        column: &'static str,
        on_delete: DeleteRule,
    ) -> Self {
        Self {
            references: Some(ForeignKey {
                table,
                column,
                on_delete,
            }),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub unique: bool,
}

impl IndexDescriptor {
    pub const fn new(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            name,
            columns,
            unique: false,
        }
    }

    pub const fn unique(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            name,
            columns,
            unique: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: &'static str,
    pub columns: &'static [ColumnDescriptor],
    pub indexes: &'static [IndexDescriptor],
}

impl TableDescriptor {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.name)
    }

    /// Columns that reference another table.
    pub fn foreign_keys(
        &self,
    ) -> impl Iterator<Item = (&'static ColumnDescriptor, &'static ForeignKey)> {
        self.columns
            .iter()
            .filter_map(|c| c.references.as_ref().map(|fk| (c, fk)))
    }

    pub fn index(&self, name: &str) -> Option<&'static IndexDescriptor> {
        self.indexes.iter().find(|i| i.name == name)
    }
}

/// A table column that points at another table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependent {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: DeleteRule,
}

/// Look up a table by name.
pub fn table(name: &str) -> Option<&'static TableDescriptor> {
    TABLES.iter().copied().find(|t| t.name == name)
}

/// Every column, across all tables, whose foreign key targets `table`.
pub fn dependents_of(table: &str) -> Vec<Dependent> {
    TABLES
        .iter()
        .flat_map(|t| {
            t.foreign_keys()
                .filter(move |(_, fk)| fk.table == table)
                .map(move |(column, fk)| Dependent {
                    table: t.name,
                    column: column.name,
                    on_delete: fk.on_delete,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_point_at_earlier_tables() {
        for (position, table) in TABLES.iter().enumerate() {
            for (column, fk) in table.foreign_keys() {
                let target = TABLES
                    .iter()
                    .position(|t| t.name == fk.table)
                    .unwrap_or_else(|| panic!("{}.{} targets unknown table", table.name, column.name));
                assert!(target < position, "{} must be created after {}", table.name, fk.table);

                let target_column = TABLES[target].column(fk.column).unwrap();
                assert!(target_column.primary_key);
                assert_eq!(target_column.kind, column.kind);
            }
        }
    }

    #[test]
    fn test_index_columns_exist() {
        for table in TABLES.iter() {
            for index in table.indexes {
                for column in index.columns {
                    assert!(
                        table.column(column).is_some(),
                        "index {} names missing column {}",
                        index.name,
                        column
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_table_has_uuid_primary_key() {
        for table in TABLES.iter() {
            let id = table.column("id").unwrap();
            assert!(id.primary_key && !id.nullable);
            assert_eq!(id.kind, ColumnKind::Uuid);
            assert_eq!(table.columns.iter().filter(|c| c.primary_key).count(), 1);
        }
    }

    #[test]
    fn test_only_invoice_project_is_set_null() {
        let set_null: Vec<_> = TABLES
            .iter()
            .flat_map(|t| t.foreign_keys().map(move |(c, fk)| (t.name, c.name, fk.on_delete)))
            .filter(|(_, _, rule)| *rule == DeleteRule::SetNull)
            .collect();

        assert_eq!(set_null, vec![("invoices", "project_id", DeleteRule::SetNull)]);
        assert!(INVOICES.column("project_id").unwrap().nullable);
    }

    #[test]
    fn test_user_dependents_all_cascade() {
        let dependents = dependents_of("users");
        let tables: Vec<_> = dependents.iter().map(|d| d.table).collect();

        assert_eq!(tables, vec!["customers", "projects", "time_entries", "invoices"]);
        assert!(dependents.iter().all(|d| d.on_delete == DeleteRule::Cascade));
    }

    #[test]
    fn test_invoice_number_unique_per_user() {
        let index = INVOICES.index("invoices_number_user_unique_idx").unwrap();

        assert!(index.unique);
        assert_eq!(index.columns, &["user_id", "invoice_number"]);
    }

    #[test]
    fn test_money_columns_are_fixed_precision() {
        let subtotal = INVOICES.column("subtotal").unwrap();
        assert_eq!(subtotal.kind, ColumnKind::Decimal(DecimalSpec::new(12, 2)));

        let tax_rate = INVOICES.column("tax_rate").unwrap();
        assert_eq!(tax_rate.kind, ColumnKind::Decimal(DecimalSpec::new(5, 2)));
        assert_eq!(tax_rate.default, Some(ColumnDefault::Decimal("0")));

        let hours = TIME_ENTRIES.column("hours").unwrap();
        assert_eq!(hours.kind, ColumnKind::Decimal(DecimalSpec::new(8, 2)));
    }

    #[test]
    fn test_enum_descriptors_match_domain() {
        use domain::{InvoiceStatus, ProjectStatus};

        let invoice: Vec<_> = InvoiceStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(INVOICE_STATUS.values, invoice.as_slice());
        assert_eq!(INVOICE_STATUS.name, "invoice_status");

        let project: Vec<_> = ProjectStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(PROJECT_STATUS.values, project.as_slice());
        assert!(PROJECT_STATUS.contains("on_hold"));
        assert!(!PROJECT_STATUS.contains("paused"));
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(table("payments"), Some(&PAYMENTS));
        assert!(table("ledger").is_none());
        assert_eq!(TABLES.len(), 7);
    }
}
