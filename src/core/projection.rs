//! Bulk projection reads used by the reporting engine.
//!
//! Each read returns raw column values (no id, no record mapping) and is capped at
//! [`BULK_READ_LIMIT`] rows ([`AISLE_READ_LIMIT`] for aisles). Collections larger
//! than the cap are silently under-sampled.

use crate::{
    entities::{
        Aisle, Department, Order, OrderProduct, Product, aisle, department, order, order_product,
        product,
    },
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder, QuerySelect};
use tracing::debug;

/// Row cap for every bulk read except aisles.
pub const BULK_READ_LIMIT: u64 = 10_000;

/// Row cap for the aisle bulk read.
pub const AISLE_READ_LIMIT: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct OrderRow {
    pub order_id: i64,
    pub user_id: i64,
    pub eval_set: String,
    pub order_number: i32,
    pub order_dow: i32,
    pub order_hour_of_day: i32,
    /// Raw stored value; may be NULL or NaN
    pub days_since_prior_order: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromQueryResult)]
pub struct OrderProductRow {
    pub order_id: i64,
    pub product_id: i64,
    pub add_to_cart_order: i32,
    pub reordered: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ProductRow {
    pub product_id: i64,
    pub product_name: String,
    pub aisle_id: i64,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct AisleRow {
    pub aisle_id: i64,
    pub aisle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct DepartmentRow {
    pub department_id: i64,
    pub department: String,
}

pub async fn load_orders(db: &DatabaseConnection) -> Result<Vec<OrderRow>> {
    let rows = Order::find()
        .select_only()
        .columns([
            order::Column::OrderId,
            order::Column::UserId,
            order::Column::EvalSet,
            order::Column::OrderNumber,
            order::Column::OrderDow,
            order::Column::OrderHourOfDay,
            order::Column::DaysSincePriorOrder,
        ])
        .order_by_asc(order::Column::Id)
        .limit(BULK_READ_LIMIT)
        .into_model::<OrderRow>()
        .all(db)
        .await?;
    debug!(rows = rows.len(), "Loaded order projection");
    Ok(rows)
}

pub async fn load_order_products(db: &DatabaseConnection) -> Result<Vec<OrderProductRow>> {
    let rows = OrderProduct::find()
        .select_only()
        .columns([
            order_product::Column::OrderId,
            order_product::Column::ProductId,
            order_product::Column::AddToCartOrder,
            order_product::Column::Reordered,
        ])
        .order_by_asc(order_product::Column::OrderId)
        .order_by_asc(order_product::Column::ProductId)
        .limit(BULK_READ_LIMIT)
        .into_model::<OrderProductRow>()
        .all(db)
        .await?;
    debug!(rows = rows.len(), "Loaded order line projection");
    Ok(rows)
}

pub async fn load_products(db: &DatabaseConnection) -> Result<Vec<ProductRow>> {
    let rows = Product::find()
        .select_only()
        .columns([
            product::Column::ProductId,
            product::Column::ProductName,
            product::Column::AisleId,
            product::Column::DepartmentId,
        ])
        .order_by_asc(product::Column::Id)
        .limit(BULK_READ_LIMIT)
        .into_model::<ProductRow>()
        .all(db)
        .await?;
    debug!(rows = rows.len(), "Loaded product projection");
    Ok(rows)
}

pub async fn load_aisles(db: &DatabaseConnection) -> Result<Vec<AisleRow>> {
    let rows = Aisle::find()
        .select_only()
        .columns([aisle::Column::AisleId, aisle::Column::Aisle])
        .order_by_asc(aisle::Column::Id)
        .limit(AISLE_READ_LIMIT)
        .into_model::<AisleRow>()
        .all(db)
        .await?;
    debug!(rows = rows.len(), "Loaded aisle projection");
    Ok(rows)
}

pub async fn load_departments(db: &DatabaseConnection) -> Result<Vec<DepartmentRow>> {
    let rows = Department::find()
        .select_only()
        .columns([
            department::Column::DepartmentId,
            department::Column::Department,
        ])
        .order_by_asc(department::Column::Id)
        .limit(BULK_READ_LIMIT)
        .into_model::<DepartmentRow>()
        .all(db)
        .await?;
    debug!(rows = rows.len(), "Loaded department projection");
    Ok(rows)
}
