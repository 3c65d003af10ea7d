//! Invoice issued by a user to a customer.
//!
//! `invoice_number` is unique per user, not globally. Deleting the linked
//! project keeps the invoice and clears `project_id`.

use domain::{InvoiceStatus, MONEY, TAX_RATE};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use super::{check_decimal, check_optional_decimal, stamp_created, stamp_updated};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub customer_id: Uuid,
    pub project_id: Option<Uuid>,
    pub invoice_number: String,
    pub issue_date: Date,
    pub due_date: Date,
    pub status: Option<InvoiceStatus>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub subtotal: Decimal,
    /// Percentage, e.g. `7.50`
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub tax_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub tax_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_amount: Decimal,
    #[sea_orm(column_type = "Text")]
    pub notes: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub terms: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "SetNull"
    )]
    Project,
    #[sea_orm(has_many = "super::invoice_line_item::Entity")]
    LineItems,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::invoice_line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        check_decimal("subtotal", MONEY, &mut self.subtotal)?;
        check_optional_decimal("tax_rate", TAX_RATE, &mut self.tax_rate)?;
        check_optional_decimal("tax_amount", MONEY, &mut self.tax_amount)?;
        check_decimal("total_amount", MONEY, &mut self.total_amount)?;
        stamp_created(&mut self.created_at, insert);
        stamp_updated(&mut self.updated_at, insert);
        Ok(self)
    }
}
