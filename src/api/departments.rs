//! `/api/v1/departments` handlers.

use super::{
    AppState, IdParam, PageParams, deleted,
    extract::{JsonBody, QueryParams},
};
use crate::{
    core::{
        department::{self, NewDepartment, DepartmentPatch},
        pagination::Page,
        records::DepartmentRecord,
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;

const ENTITY: &str = "Department";

#[derive(Debug, Serialize)]
pub struct DepartmentList {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub departments: Vec<DepartmentRecord>,
}

impl From<Page<DepartmentRecord>> for DepartmentList {
    fn from(page: Page<DepartmentRecord>) -> Self {
        Self {
            total: page.total,
            skip: page.skip,
            limit: page.limit,
            departments: page.items,
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_department): JsonBody<NewDepartment>,
) -> Result<Json<DepartmentRecord>> {
    Ok(Json(department::create_department(&state.db, new_department).await?))
}

pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<Json<DepartmentList>> {
    let page = department::list_departments(&state.db, params.pagination()?).await?;
    Ok(Json(page.into()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DepartmentRecord>> {
    let record = department::get_department(&state.db, &id).await?;
    record.map(Json).ok_or(Error::NotFound { entity: ENTITY, id })
}

/// Applies the patch and returns the stored department; 404 when nothing changed.
pub async fn update(
    State(state): State<AppState>,
    QueryParams(IdParam { id }): QueryParams<IdParam>,
    JsonBody(patch): JsonBody<DepartmentPatch>,
) -> Result<Json<DepartmentRecord>> {
    if department::update_department(&state.db, &id, patch).await? {
        if let Some(updated) = department::get_department(&state.db, &id).await? {
            return Ok(Json(updated));
        }
    }
    Err(Error::NotFound { entity: ENTITY, id })
}

pub async fn delete(
    State(state): State<AppState>,
    QueryParams(IdParam { id }): QueryParams<IdParam>,
) -> Result<Json<Value>> {
    if department::delete_department(&state.db, &id).await? {
        Ok(deleted(ENTITY, &id))
    } else {
        Err(Error::NotFound { entity: ENTITY, id })
    }
}
