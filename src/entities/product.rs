//! Product entity - A catalog item placed in one aisle and one department.
//!
//! `aisle_id` and `department_id` hold the natural keys of the aisle and
//! department, not their storage ids.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Storage-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Natural key of the product
    pub product_id: i64,
    /// Display name of the product
    pub product_name: String,
    /// Natural key of the aisle the product is shelved in
    pub aisle_id: i64,
    /// Natural key of the department the product belongs to
    pub department_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
