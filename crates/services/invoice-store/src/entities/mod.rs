//! SeaORM entities for the invoicing tables.
//!
//! Each module mirrors one descriptor in [`crate::schema`]. Active models
//! assign their own UUID on creation, keep `created_at`/`updated_at` current,
//! and refuse decimal values that would not fit their column.

pub mod customer;
pub mod invoice;
pub mod invoice_line_item;
pub mod payment;
pub mod project;
pub mod time_entry;
pub mod user;

use chrono::Utc;
use domain::DecimalSpec;
use sea_orm::prelude::{DateTime, Decimal};
use sea_orm::{ActiveValue, DbErr};

pub use customer::Entity as Customer;
pub use invoice::Entity as Invoice;
pub use invoice_line_item::Entity as InvoiceLineItem;
pub use payment::Entity as Payment;
pub use project::Entity as Project;
pub use time_entry::Entity as TimeEntry;
pub use user::Entity as User;

/// Current UTC time without zone, as stored in timestamp columns.
pub fn now() -> DateTime {
    Utc::now().naive_utc()
}

/// Set `created_at` on insert unless the caller supplied one.
pub(crate) fn stamp_created(created_at: &mut ActiveValue<DateTime>, insert: bool) {
    if insert && created_at.is_not_set() {
        *created_at = ActiveValue::Set(now());
    }
}

/// Set `updated_at` on insert unless supplied, and on every update.
pub(crate) fn stamp_updated(updated_at: &mut ActiveValue<DateTime>, insert: bool) {
    if !insert || updated_at.is_not_set() {
        *updated_at = ActiveValue::Set(now());
    }
}

/// Value the row will hold after the save, whether written now or loaded.
pub(crate) fn current(value: &ActiveValue<Decimal>) -> Option<Decimal> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(*v),
        ActiveValue::NotSet => None,
    }
}

/// Validate a decimal being written and rescale it to the column's scale.
pub(crate) fn check_decimal(
    field: &str,
    spec: DecimalSpec,
    value: &mut ActiveValue<Decimal>,
) -> Result<(), DbErr> {
    if let ActiveValue::Set(v) = value {
        *v = spec
            .check(field, *v)
            .map_err(|e| DbErr::Custom(e.to_string()))?;
    }
    Ok(())
}

pub(crate) fn check_optional_decimal(
    field: &str,
    spec: DecimalSpec,
    value: &mut ActiveValue<Option<Decimal>>,
) -> Result<(), DbErr> {
    if let ActiveValue::Set(Some(v)) = value {
        *v = spec
            .check(field, *v)
            .map_err(|e| DbErr::Custom(e.to_string()))?;
    }
    Ok(())
}
