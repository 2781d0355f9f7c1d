//! Aisle entity - A named store aisle, referenced by products through `aisle_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Aisle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "aisles")]
pub struct Model {
    /// Storage-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Natural key of the aisle
    pub aisle_id: i64,
    /// Aisle name (e.g. "fresh fruits")
    pub aisle: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
