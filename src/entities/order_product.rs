//! `OrderProduct` entity - One product line within one order.
//!
//! Keyed by the `(order_id, product_id)` natural-key pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_products")]
pub struct Model {
    /// Natural key of the order this line belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i64,
    /// Natural key of the product on this line
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Position at which the product was added to the cart
    pub add_to_cart_order: i32,
    /// 1 if the user has ordered this product before, else 0
    pub reordered: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
