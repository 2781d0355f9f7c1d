//! Aisle business logic - store operations for the aisle collection.

use crate::{
    core::{
        pagination::{Page, Pagination},
        records::{AisleRecord, parse_record_id},
        require_non_empty, set_if_changed,
    },
    entities::{Aisle, aisle},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

const ENTITY: &str = "Aisle";

/// Fields accepted when creating an aisle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAisle {
    pub aisle_id: i64,
    pub aisle: String,
}

/// Partial aisle update. The natural key cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AislePatch {
    pub aisle: Option<String>,
}

impl AislePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.aisle.is_none()
    }
}

/// Lists one page of aisles with the collection's total size.
pub async fn list_aisles(
    db: &DatabaseConnection,
    pagination: Pagination,
) -> Result<Page<AisleRecord>> {
    debug!(
        skip = pagination.skip(),
        limit = pagination.limit(),
        "Listing aisles"
    );
    let models = Aisle::find()
        .order_by_asc(aisle::Column::Id)
        .offset(pagination.skip())
        .limit(pagination.limit())
        .all(db)
        .await?;
    let total = Aisle::find().count(db).await?;
    Ok(Page::from_models(pagination, total, models))
}

/// Finds an aisle by its id.
pub async fn get_aisle(db: &DatabaseConnection, id: &str) -> Result<Option<AisleRecord>> {
    let key = parse_record_id(id)?;
    Ok(Aisle::find_by_id(key).one(db).await?.map(AisleRecord::from))
}

/// Inserts a new aisle and returns it as stored.
///
/// # Errors
/// Returns an error if the aisle name is blank or the database insert fails.
pub async fn create_aisle(db: &DatabaseConnection, new_aisle: NewAisle) -> Result<AisleRecord> {
    require_non_empty("aisle", &new_aisle.aisle)?;

    let aisle = aisle::ActiveModel {
        aisle_id: Set(new_aisle.aisle_id),
        aisle: Set(new_aisle.aisle),
        ..Default::default()
    };
    let model = aisle.insert(db).await?;
    info!(id = model.id, aisle_id = model.aisle_id, "Aisle created");
    Ok(model.into())
}

/// Renames an aisle. Returns whether the stored name changed.
pub async fn update_aisle(db: &DatabaseConnection, id: &str, patch: AislePatch) -> Result<bool> {
    let key = parse_record_id(id)?;
    if patch.is_empty() {
        return Err(Error::EmptyUpdate { entity: ENTITY });
    }
    let name = match patch.aisle {
        Some(name) => {
            require_non_empty("aisle", &name)?;
            Some(name)
        }
        None => None,
    };

    let Some(current) = Aisle::find_by_id(key).one(db).await? else {
        return Ok(false);
    };
    let mut aisle: aisle::ActiveModel = current.clone().into();
    let changed = set_if_changed(&mut aisle.aisle, &current.aisle, name);
    if changed {
        aisle.update(db).await?;
        info!(id = key, "Aisle updated");
    }
    Ok(changed)
}

/// Deletes an aisle, returning whether a row was removed.
pub async fn delete_aisle(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let key = parse_record_id(id)?;
    let result = Aisle::delete_by_id(key).exec(db).await?;
    Ok(result.rows_affected > 0)
}
