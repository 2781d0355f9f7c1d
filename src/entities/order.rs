//! Order entity - One customer order from the grocery dataset.
//!
//! `days_since_prior_order` is NULL for a user's first order. Imported data may
//! also carry NaN there; [`crate::core::records`] normalizes that to absent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Storage-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Natural key of the order
    pub order_id: i64,
    /// Customer who placed the order
    pub user_id: i64,
    /// Dataset split label (e.g. `"prior"`, `"train"`)
    pub eval_set: String,
    /// Sequence number of this order for the user
    pub order_number: i32,
    /// Day of week, 0-6
    pub order_dow: i32,
    /// Hour of day, 0-23
    pub order_hour_of_day: i32,
    /// Days since the user's previous order, absent for the first one
    pub days_since_prior_order: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
