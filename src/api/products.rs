//! `/api/v1/products` handlers.

use super::{
    AppState, IdParam, PageParams, deleted,
    extract::{JsonBody, QueryParams},
};
use crate::{
    core::{
        product::{self, NewProduct, ProductPatch},
        pagination::Page,
        records::ProductRecord,
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;

const ENTITY: &str = "Product";

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub products: Vec<ProductRecord>,
}

impl From<Page<ProductRecord>> for ProductList {
    fn from(page: Page<ProductRecord>) -> Self {
        Self {
            total: page.total,
            skip: page.skip,
            limit: page.limit,
            products: page.items,
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_product): JsonBody<NewProduct>,
) -> Result<Json<ProductRecord>> {
    Ok(Json(product::create_product(&state.db, new_product).await?))
}

pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<Json<ProductList>> {
    let page = product::list_products(&state.db, params.pagination()?).await?;
    Ok(Json(page.into()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductRecord>> {
    let record = product::get_product(&state.db, &id).await?;
    record.map(Json).ok_or(Error::NotFound { entity: ENTITY, id })
}

/// Applies the patch and returns the stored product; 404 when nothing changed.
pub async fn update(
    State(state): State<AppState>,
    QueryParams(IdParam { id }): QueryParams<IdParam>,
    JsonBody(patch): JsonBody<ProductPatch>,
) -> Result<Json<ProductRecord>> {
    if product::update_product(&state.db, &id, patch).await? {
        if let Some(updated) = product::get_product(&state.db, &id).await? {
            return Ok(Json(updated));
        }
    }
    Err(Error::NotFound { entity: ENTITY, id })
}

pub async fn delete(
    State(state): State<AppState>,
    QueryParams(IdParam { id }): QueryParams<IdParam>,
) -> Result<Json<Value>> {
    if product::delete_product(&state.db, &id).await? {
        Ok(deleted(ENTITY, &id))
    } else {
        Err(Error::NotFound { entity: ENTITY, id })
    }
}
