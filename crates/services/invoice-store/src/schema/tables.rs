//! The invoicing tables, in creation order.

use domain::{
    InvoiceStatus, ProjectStatus, CURRENCY_CODE_LENGTH, DEFAULT_CUSTOMER_CURRENCY,
    DEFAULT_LINE_ITEM_ORDER, DEFAULT_USER_CURRENCY, HOURS, INVOICE_NUMBER_LENGTH, MONEY,
    NAME_LENGTH, PAYMENT_METHOD_LENGTH, PAYMENT_REFERENCE_LENGTH, QUANTITY, RATE,
    SHORT_CODE_LENGTH, TAX_RATE,
};

use super::ColumnKind::{Boolean, Date, Decimal, Enum, Integer, Text, Timestamp, Uuid, Varchar};
use super::{
    ColumnDefault, ColumnDescriptor as Col, DeleteRule, EnumDescriptor, IndexDescriptor,
    TableDescriptor,
};

pub static PROJECT_STATUS: EnumDescriptor = EnumDescriptor {
    name: ProjectStatus::TYPE_NAME,
    values: &[
        ProjectStatus::Active.as_str(),
        ProjectStatus::Completed.as_str(),
        ProjectStatus::Archived.as_str(),
        ProjectStatus::OnHold.as_str(),
    ],
};

pub static INVOICE_STATUS: EnumDescriptor = EnumDescriptor {
    name: InvoiceStatus::TYPE_NAME,
    values: &[
        InvoiceStatus::Draft.as_str(),
        InvoiceStatus::Sent.as_str(),
        InvoiceStatus::Paid.as_str(),
        InvoiceStatus::Overdue.as_str(),
        InvoiceStatus::Cancelled.as_str(),
        InvoiceStatus::PartiallyPaid.as_str(),
    ],
};

pub static ENUMS: [&EnumDescriptor; 2] = [&INVOICE_STATUS, &PROJECT_STATUS];

const fn id() -> Col {
    Col::new("id", Uuid)
        .primary_key()
        .default(ColumnDefault::RandomUuid)
}

const fn timestamp(name: &'static str) -> Col {
    Col::new(name, Timestamp)
        .not_null()
        .default(ColumnDefault::Now)
}

const fn owner(name: &'static str, table: &'static str) -> Col {
    Col::new(name, Uuid)
        .not_null()
        .references(table, "id", DeleteRule::Cascade)
}

pub static USERS: TableDescriptor = TableDescriptor {
    name: "users",
    columns: &[
        id(),
        Col::new("name", Varchar(NAME_LENGTH)).not_null(),
        Col::new("email", Varchar(NAME_LENGTH)).not_null().unique(),
        Col::new("password_hash", Text).not_null(),
        Col::new("company_name", Varchar(NAME_LENGTH)),
        Col::new("address", Text),
        Col::new("tax_id", Varchar(SHORT_CODE_LENGTH)),
        Col::new("currency", Varchar(CURRENCY_CODE_LENGTH))
            .default(ColumnDefault::Text(DEFAULT_USER_CURRENCY)),
        timestamp("created_at"),
        timestamp("updated_at"),
    ],
    indexes: &[],
};

pub static CUSTOMERS: TableDescriptor = TableDescriptor {
    name: "customers",
    columns: &[
        id(),
        owner("user_id", "users"),
        Col::new("name", Varchar(NAME_LENGTH)).not_null(),
        Col::new("email", Varchar(NAME_LENGTH)),
        Col::new("phone", Varchar(SHORT_CODE_LENGTH)),
        Col::new("address", Text),
        Col::new("tax_id", Varchar(SHORT_CODE_LENGTH)),
        Col::new("currency", Varchar(CURRENCY_CODE_LENGTH))
            .default(ColumnDefault::Text(DEFAULT_CUSTOMER_CURRENCY)),
        Col::new("notes", Text),
        timestamp("created_at"),
        timestamp("updated_at"),
    ],
    indexes: &[IndexDescriptor::new("customers_user_idx", &["user_id"])],
};

pub static PROJECTS: TableDescriptor = TableDescriptor {
    name: "projects",
    columns: &[
        id(),
        owner("user_id", "users"),
        owner("customer_id", "customers"),
        Col::new("name", Varchar(NAME_LENGTH)).not_null(),
        Col::new("description", Text),
        Col::new("hourly_rate", Decimal(RATE)),
        Col::new("status", Enum(&PROJECT_STATUS))
            .default(ColumnDefault::Text(ProjectStatus::Active.as_str())),
        Col::new("start_date", Date),
        Col::new("end_date", Date),
        Col::new("budget_hours", Decimal(QUANTITY)),
        Col::new("budget_amount", Decimal(MONEY)),
        timestamp("created_at"),
        timestamp("updated_at"),
    ],
    indexes: &[
        IndexDescriptor::new("projects_user_idx", &["user_id"]),
        IndexDescriptor::new("projects_customer_idx", &["customer_id"]),
    ],
};

pub static TIME_ENTRIES: TableDescriptor = TableDescriptor {
    name: "time_entries",
    columns: &[
        id(),
        owner("user_id", "users"),
        owner("project_id", "projects"),
        Col::new("date", Date).not_null(),
        Col::new("hours", Decimal(HOURS)).not_null(),
        Col::new("description", Text).not_null(),
        Col::new("billable", Boolean).default(ColumnDefault::Bool(true)),
        Col::new("billed", Boolean).default(ColumnDefault::Bool(false)),
        timestamp("created_at"),
        timestamp("updated_at"),
    ],
    indexes: &[
        IndexDescriptor::new("time_entries_user_idx", &["user_id"]),
        IndexDescriptor::new("time_entries_project_idx", &["project_id"]),
        IndexDescriptor::new("time_entries_date_idx", &["date"]),
    ],
};

pub static INVOICES: TableDescriptor = TableDescriptor {
    name: "invoices",
    columns: &[
        id(),
        owner("user_id", "users"),
        owner("customer_id", "customers"),
        Col::new("project_id", Uuid).references("projects", "id", DeleteRule::SetNull),
        Col::new("invoice_number", Varchar(INVOICE_NUMBER_LENGTH)).not_null(),
        Col::new("issue_date", Date).not_null(),
        Col::new("due_date", Date).not_null(),
        Col::new("status", Enum(&INVOICE_STATUS))
            .default(ColumnDefault::Text(InvoiceStatus::Draft.as_str())),
        Col::new("subtotal", Decimal(MONEY)).not_null(),
        Col::new("tax_rate", Decimal(TAX_RATE)).default(ColumnDefault::Decimal("0")),
        Col::new("tax_amount", Decimal(MONEY)).default(ColumnDefault::Decimal("0")),
        Col::new("total_amount", Decimal(MONEY)).not_null(),
        Col::new("notes", Text),
        Col::new("terms", Text),
        timestamp("created_at"),
        timestamp("updated_at"),
    ],
    indexes: &[
        IndexDescriptor::new("invoices_user_idx", &["user_id"]),
        IndexDescriptor::new("invoices_customer_idx", &["customer_id"]),
        IndexDescriptor::new("invoices_status_idx", &["status"]),
        IndexDescriptor::unique("invoices_number_user_unique_idx", &["user_id", "invoice_number"]),
    ],
};

pub static INVOICE_LINE_ITEMS: TableDescriptor = TableDescriptor {
    name: "invoice_line_items",
    columns: &[
        id(),
        owner("invoice_id", "invoices"),
        Col::new("description", Text).not_null(),
        Col::new("quantity", Decimal(QUANTITY)).not_null(),
        Col::new("unit_price", Decimal(MONEY)).not_null(),
        Col::new("amount", Decimal(MONEY)).not_null(),
        Col::new("taxable", Boolean).default(ColumnDefault::Bool(true)),
        Col::new("order", Integer).default(ColumnDefault::Integer(DEFAULT_LINE_ITEM_ORDER)),
    ],
    indexes: &[IndexDescriptor::new("line_items_invoice_idx", &["invoice_id"])],
};

pub static PAYMENTS: TableDescriptor = TableDescriptor {
    name: "payments",
    columns: &[
        id(),
        owner("invoice_id", "invoices"),
        Col::new("amount", Decimal(MONEY)).not_null(),
        Col::new("payment_date", Date).not_null(),
        Col::new("method", Varchar(PAYMENT_METHOD_LENGTH)),
        Col::new("reference", Varchar(PAYMENT_REFERENCE_LENGTH)),
        Col::new("notes", Text),
        timestamp("created_at"),
    ],
    indexes: &[IndexDescriptor::new("payments_invoice_idx", &["invoice_id"])],
};

/// All tables, parents before children.
pub static TABLES: [&TableDescriptor; 7] = [
    &USERS,
    &CUSTOMERS,
    &PROJECTS,
    &TIME_ENTRIES,
    &INVOICES,
    &INVOICE_LINE_ITEMS,
    &PAYMENTS,
];
