//! One billed line of an invoice.

use domain::{line_amount, MONEY, QUANTITY};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use super::{check_decimal, current};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "invoice_line_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub invoice_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub unit_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub taxable: Option<bool>,
    /// Position on the invoice
    #[sea_orm(column_name = "order")]
    pub display_order: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceId",
        to = "super::invoice::Column::Id",
        on_delete = "Cascade"
    )]
    Invoice,
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
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

    /// Derives `amount` from quantity and unit price whenever either input is
    /// written and the caller does not write `amount` itself.
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        check_decimal("quantity", QUANTITY, &mut self.quantity)?;
        check_decimal("unit_price", MONEY, &mut self.unit_price)?;

        let inputs_written = self.quantity.is_set() || self.unit_price.is_set();
        if inputs_written && !self.amount.is_set() {
            if let (Some(quantity), Some(unit_price)) =
                (current(&self.quantity), current(&self.unit_price))
            {
                let amount =
                    line_amount(quantity, unit_price).map_err(|e| DbErr::Custom(e.to_string()))?;
                self.amount = Set(amount);
            }
        }
        check_decimal("amount", MONEY, &mut self.amount)?;
        Ok(self)
    }
}
