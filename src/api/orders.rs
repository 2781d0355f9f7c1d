//! `/api/v1/orders` handlers.

use super::{
    AppState, IdParam, PageParams, deleted,
    extract::{JsonBody, QueryParams},
};
use crate::{
    core::{
        order::{self, NewOrder, OrderPatch},
        pagination::Page,
        records::OrderRecord,
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;

const ENTITY: &str = "Order";

#[derive(Debug, Serialize)]
pub struct OrderList {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub orders: Vec<OrderRecord>,
}

impl From<Page<OrderRecord>> for OrderList {
    fn from(page: Page<OrderRecord>) -> Self {
        Self {
            total: page.total,
            skip: page.skip,
            limit: page.limit,
            orders: page.items,
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_order): JsonBody<NewOrder>,
) -> Result<Json<OrderRecord>> {
    Ok(Json(order::create_order(&state.db, new_order).await?))
}

pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<Json<OrderList>> {
    let page = order::list_orders(&state.db, params.pagination()?).await?;
    Ok(Json(page.into()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderRecord>> {
    let record = order::get_order(&state.db, &id).await?;
    record.map(Json).ok_or(Error::NotFound { entity: ENTITY, id })
}

/// Applies the patch and returns the stored order; 404 when nothing changed.
pub async fn update(
    State(state): State<AppState>,
    QueryParams(IdParam { id }): QueryParams<IdParam>,
    JsonBody(patch): JsonBody<OrderPatch>,
) -> Result<Json<OrderRecord>> {
    if order::update_order(&state.db, &id, patch).await? {
        if let Some(updated) = order::get_order(&state.db, &id).await? {
            return Ok(Json(updated));
        }
    }
    Err(Error::NotFound { entity: ENTITY, id })
}

pub async fn delete(
    State(state): State<AppState>,
    QueryParams(IdParam { id }): QueryParams<IdParam>,
) -> Result<Json<Value>> {
    if order::delete_order(&state.db, &id).await? {
        Ok(deleted(ENTITY, &id))
    } else {
        Err(Error::NotFound { entity: ENTITY, id })
    }
}
