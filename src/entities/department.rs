//! Department entity - A named store department, referenced by products through `department_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Department database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    /// Storage-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Natural key of the department
    pub department_id: i64,
    /// Department name (e.g. "produce")
    pub department: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
