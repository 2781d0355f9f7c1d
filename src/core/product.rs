//! Product business logic - Handles all product-related store operations.
//!
//! Products point at their aisle and department by natural key. Those references are
//! not checked here: a product may name an aisle that does not exist yet, and the
//! reporting joins simply drop such rows.

use crate::{
    core::{
        pagination::{Page, Pagination},
        records::{ProductRecord, parse_record_id},
        require_non_empty, set_if_changed,
    },
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

const ENTITY: &str = "Product";

/// Fields accepted when creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProduct {
    pub product_id: i64,
    pub product_name: String,
    pub aisle_id: i64,
    pub department_id: i64,
}

/// Partial product update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub product_name: Option<String>,
    pub aisle_id: Option<i64>,
    pub department_id: Option<i64>,
}

impl ProductPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_name.is_none() && self.aisle_id.is_none() && self.department_id.is_none()
    }
}

/// Retrieves one page of products, ordered by storage id, with the collection's total size.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(
    db: &DatabaseConnection,
    pagination: Pagination,
) -> Result<Page<ProductRecord>> {
    debug!(
        skip = pagination.skip(),
        limit = pagination.limit(),
        "Listing products"
    );
    let models = Product::find()
        .order_by_asc(product::Column::Id)
        .offset(pagination.skip())
        .limit(pagination.limit())
        .all(db)
        .await?;
    let total = Product::find().count(db).await?;
    Ok(Page::from_models(pagination, total, models))
}

/// Retrieves a specific product by its id.
///
/// # Errors
/// Returns an error if the id is malformed or the database query fails.
pub async fn get_product(db: &DatabaseConnection, id: &str) -> Result<Option<ProductRecord>> {
    let key = parse_record_id(id)?;
    Ok(Product::find_by_id(key)
        .one(db)
        .await?
        .map(ProductRecord::from))
}

/// Creates a new product.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    new_product: NewProduct,
) -> Result<ProductRecord> {
    require_non_empty("product_name", &new_product.product_name)?;

    let product = product::ActiveModel {
        product_id: Set(new_product.product_id),
        product_name: Set(new_product.product_name),
        aisle_id: Set(new_product.aisle_id),
        department_id: Set(new_product.department_id),
        ..Default::default()
    };
    let model = product.insert(db).await?;
    info!(id = model.id, product_id = model.product_id, "Product created");
    Ok(model.into())
}

/// Merges the supplied fields into an existing product.
///
/// Returns `true` only if a stored value changed.
///
/// # Errors
/// Returns an error if:
/// - The id is malformed
/// - The patch is empty or names a blank product
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    id: &str,
    patch: ProductPatch,
) -> Result<bool> {
    let key = parse_record_id(id)?;
    if patch.is_empty() {
        return Err(Error::EmptyUpdate { entity: ENTITY });
    }
    if let Some(name) = &patch.product_name {
        require_non_empty("product_name", name)?;
    }

    let Some(current) = Product::find_by_id(key).one(db).await? else {
        return Ok(false);
    };

    let mut product: product::ActiveModel = current.clone().into();
    let mut changed = set_if_changed(
        &mut product.product_name,
        &current.product_name,
        patch.product_name,
    );
    changed |= set_if_changed(&mut product.aisle_id, &current.aisle_id, patch.aisle_id);
    changed |= set_if_changed(
        &mut product.department_id,
        &current.department_id,
        patch.department_id,
    );

    if changed {
        product.update(db).await?;
        info!(id = key, "Product updated");
    }
    Ok(changed)
}

/// Deletes a product, returning whether a row was removed.
///
/// # Errors
/// Returns an error if the id is malformed or the database delete fails.
pub async fn delete_product(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let key = parse_record_id(id)?;
    let result = Product::delete_by_id(key).exec(db).await?;
    Ok(result.rows_affected > 0)
}
