//! Closed status enumerations for projects and invoices.
//!
//! Both are stored as PostgreSQL enum types (`project_status`,
//! `invoice_status`). With the `database` feature they derive SeaORM's
//! active-enum support so entities can use them directly as column types.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(
    feature = "database",
    derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum),
    sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "active"))]
    Active,
    #[cfg_attr(feature = "database", sea_orm(string_value = "completed"))]
    Completed,
    #[cfg_attr(feature = "database", sea_orm(string_value = "archived"))]
    Archived,
    #[cfg_attr(feature = "database", sea_orm(string_value = "on_hold"))]
    OnHold,
}

impl ProjectStatus {
    /// Storage type name
    pub const TYPE_NAME: &'static str = "project_status";

    /// Every value, in declaration order
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::Archived,
        ProjectStatus::OnHold,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
            ProjectStatus::OnHold => "on_hold",
        }
    }
}

/// Lifecycle of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(
    feature = "database",
    derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum),
    sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")
)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "draft"))]
    Draft,
    #[cfg_attr(feature = "database", sea_orm(string_value = "sent"))]
    Sent,
    #[cfg_attr(feature = "database", sea_orm(string_value = "paid"))]
    Paid,
    #[cfg_attr(feature = "database", sea_orm(string_value = "overdue"))]
    Overdue,
    #[cfg_attr(feature = "database", sea_orm(string_value = "cancelled"))]
    Cancelled,
    #[cfg_attr(feature = "database", sea_orm(string_value = "partially_paid"))]
    PartiallyPaid,
}

impl InvoiceStatus {
    /// Storage type name
    pub const TYPE_NAME: &'static str = "invoice_status";

    /// Every value, in declaration order
    pub const ALL: [InvoiceStatus; 6] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
        InvoiceStatus::PartiallyPaid,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
            InvoiceStatus::PartiallyPaid => "partially_paid",
        }
    }
}

macro_rules! impl_from_str {
    ($ty:ident, $label:literal) => {
        impl std::str::FromStr for $ty {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|status| status.as_str() == s)
                    .ok_or_else(|| {
                        DomainError::validation(format!("unknown {} '{}'", $label, s))
                    })
            }
        }
    };
}

impl_from_str!(ProjectStatus, "project status");
impl_from_str!(InvoiceStatus, "invoice status");
