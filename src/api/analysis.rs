//! `/api/v1/analysis` handlers. Each one answers from the engine's cached snapshot.

use super::AppState;
use crate::{
    core::report::{
        DepartmentDiversityReport, ReorderReport, SingleAisleReport, SnapshotSummary,
        StapleTimeOfDayReport, WeekendBasketReport,
    },
    errors::Result,
};
use axum::{Json, extract::State};
use tracing::info;

pub async fn hypothesis1(State(state): State<AppState>) -> Result<Json<SingleAisleReport>> {
    Ok(Json(state.reports.single_aisle_ratio().await?))
}

pub async fn hypothesis2(State(state): State<AppState>) -> Result<Json<ReorderReport>> {
    Ok(Json(state.reports.reorder_ratio().await?))
}

pub async fn hypothesis3(State(state): State<AppState>) -> Result<Json<StapleTimeOfDayReport>> {
    Ok(Json(state.reports.staple_time_of_day().await?))
}

pub async fn hypothesis4(
    State(state): State<AppState>,
) -> Result<Json<DepartmentDiversityReport>> {
    Ok(Json(state.reports.department_diversity().await?))
}

pub async fn hypothesis5(State(state): State<AppState>) -> Result<Json<WeekendBasketReport>> {
    Ok(Json(state.reports.weekend_basket_size().await?))
}

/// Drops the cached snapshot and reads storage again.
pub async fn reload(State(state): State<AppState>) -> Result<Json<SnapshotSummary>> {
    let summary = state.reports.reload().await?.summary();
    info!(loaded_at = %summary.loaded_at, "Report snapshot reloaded on request");
    Ok(Json(summary))
}
