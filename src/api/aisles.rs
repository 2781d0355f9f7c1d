//! `/api/v1/aisles` handlers.

use super::{
    AppState, IdParam, PageParams, deleted,
    extract::{JsonBody, QueryParams},
};
use crate::{
    core::{
        aisle::{self, NewAisle, AislePatch},
        pagination::Page,
        records::AisleRecord,
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;

const ENTITY: &str = "Aisle";

#[derive(Debug, Serialize)]
pub struct AisleList {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub aisles: Vec<AisleRecord>,
}

impl From<Page<AisleRecord>> for AisleList {
    fn from(page: Page<AisleRecord>) -> Self {
        Self {
            total: page.total,
            skip: page.skip,
            limit: page.limit,
            aisles: page.items,
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_aisle): JsonBody<NewAisle>,
) -> Result<Json<AisleRecord>> {
    Ok(Json(aisle::create_aisle(&state.db, new_aisle).await?))
}

pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<Json<AisleList>> {
    let page = aisle::list_aisles(&state.db, params.pagination()?).await?;
    Ok(Json(page.into()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AisleRecord>> {
    let record = aisle::get_aisle(&state.db, &id).await?;
    record.map(Json).ok_or(Error::NotFound { entity: ENTITY, id })
}

/// Applies the patch and returns the stored aisle; 404 when nothing changed.
pub async fn update(
    State(state): State<AppState>,
    QueryParams(IdParam { id }): QueryParams<IdParam>,
    JsonBody(patch): JsonBody<AislePatch>,
) -> Result<Json<AisleRecord>> {
    if aisle::update_aisle(&state.db, &id, patch).await? {
        if let Some(updated) = aisle::get_aisle(&state.db, &id).await? {
            return Ok(Json(updated));
        }
    }
    Err(Error::NotFound { entity: ENTITY, id })
}

pub async fn delete(
    State(state): State<AppState>,
    QueryParams(IdParam { id }): QueryParams<IdParam>,
) -> Result<Json<Value>> {
    if aisle::delete_aisle(&state.db, &id).await? {
        Ok(deleted(ENTITY, &id))
    } else {
        Err(Error::NotFound { entity: ENTITY, id })
    }
}
