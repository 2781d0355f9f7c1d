//! HTTP API - JSON resources over the store plus the analysis endpoints.
//!
//! Handlers are thin: they extract input, call into [`crate::core`] and let
//! [`crate::errors::Error`] pick the status code.

/// Report endpoints
pub mod analysis;
/// Aisle resource
pub mod aisles;
/// Department resource
pub mod departments;
/// Error to response mapping
pub mod error;
/// Body and query extractors with JSON error bodies
pub mod extract;
/// Order resource
pub mod orders;
/// Product resource
pub mod products;

use crate::{
    core::{pagination::Pagination, report::ReportingEngine},
    errors::Result,
};
use axum::{
    Json, Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared data available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Connection used by the CRUD handlers
    pub db: Arc<DatabaseConnection>,
    /// Reporting engine with its cached snapshot
    pub reports: Arc<ReportingEngine>,
}

impl AppState {
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, reports: ReportingEngine) -> Self {
        Self {
            db,
            reports: Arc::new(reports),
        }
    }
}

/// `?skip=&limit=` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    fn pagination(&self) -> Result<Pagination> {
        Pagination::from_query(self.skip, self.limit)
    }
}

/// `?id=` query parameter used by update and delete.
#[derive(Debug, Deserialize)]
pub struct IdParam {
    pub id: String,
}

fn deleted(entity: &str, id: &str) -> Json<Value> {
    Json(json!({ "message": format!("{entity} {id} deleted successfully") }))
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/orders",
            get(orders::list)
                .post(orders::create)
                .put(orders::update)
                .delete(orders::delete),
        )
        .route("/api/v1/orders/:id", get(orders::get))
        .route(
            "/api/v1/aisles",
            get(aisles::list)
                .post(aisles::create)
                .put(aisles::update)
                .delete(aisles::delete),
        )
        .route("/api/v1/aisles/:id", get(aisles::get))
        .route(
            "/api/v1/departments",
            get(departments::list)
                .post(departments::create)
                .put(departments::update)
                .delete(departments::delete),
        )
        .route("/api/v1/departments/:id", get(departments::get))
        .route(
            "/api/v1/products",
            get(products::list)
                .post(products::create)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/api/v1/products/:id", get(products::get))
        .route("/api/v1/analysis/hypothesis1", get(analysis::hypothesis1))
        .route("/api/v1/analysis/hypothesis2", get(analysis::hypothesis2))
        .route("/api/v1/analysis/hypothesis3", get(analysis::hypothesis3))
        .route("/api/v1/analysis/hypothesis4", get(analysis::hypothesis4))
        .route("/api/v1/analysis/hypothesis5", get(analysis::hypothesis5))
        .route("/api/v1/analysis/reload", post(analysis::reload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
