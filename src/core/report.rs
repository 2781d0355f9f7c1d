//! Report generation business logic.
//!
//! The [`ReportingEngine`] loads every collection once through the bulk projection
//! reads, keeps the resulting [`Snapshot`] for its lifetime and answers five
//! descriptive questions about it. The analyses themselves are plain functions over
//! a snapshot, so they can be exercised without a database.
//!
//! Joins are inner joins on natural keys and keep join multiplicity: a key that
//! matches two rows on the other side yields two joined rows. Ratios and means over
//! nothing are `NaN`, never zero and never an error.

use crate::{
    config::app::{ReportConfig, StapleMatch},
    core::projection::{self, AisleRow, DepartmentRow, OrderProductRow, OrderRow, ProductRow},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::Hash,
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// In-memory copy of all five collections.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub orders: Vec<OrderRow>,
    pub order_products: Vec<OrderProductRow>,
    pub products: Vec<ProductRow>,
    pub aisles: Vec<AisleRow>,
    pub departments: Vec<DepartmentRow>,
    /// When the rows were read from storage
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Builds a snapshot from rows already in memory, stamped with the current time.
    #[must_use]
    pub fn from_rows(
        orders: Vec<OrderRow>,
        order_products: Vec<OrderProductRow>,
        products: Vec<ProductRow>,
        aisles: Vec<AisleRow>,
        departments: Vec<DepartmentRow>,
    ) -> Self {
        Self {
            orders,
            order_products,
            products,
            aisles,
            departments,
            loaded_at: Utc::now(),
        }
    }

    /// Reads all five bulk projections. Any storage failure aborts the whole load.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let orders = projection::load_orders(db).await?;
        let order_products = projection::load_order_products(db).await?;
        let products = projection::load_products(db).await?;
        let aisles = projection::load_aisles(db).await?;
        let departments = projection::load_departments(db).await?;

        let snapshot = Self::from_rows(orders, order_products, products, aisles, departments);
        info!(
            orders = snapshot.orders.len(),
            order_products = snapshot.order_products.len(),
            products = snapshot.products.len(),
            aisles = snapshot.aisles.len(),
            departments = snapshot.departments.len(),
            "Report snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Row counts and load time, for the reload endpoint.
    #[must_use]
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            orders: self.orders.len(),
            order_products: self.order_products.len(),
            products: self.products.len(),
            aisles: self.aisles.len(),
            departments: self.departments.len(),
            loaded_at: self.loaded_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub orders: usize,
    pub order_products: usize,
    pub products: usize,
    pub aisles: usize,
    pub departments: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Orders whose products all come from a single aisle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleAisleReport {
    pub total_orders: usize,
    pub same_aisle_orders: usize,
    pub percentage_same_aisle: f64,
}

/// Share of order lines that are reorders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReorderReport {
    pub total_products: usize,
    pub reordered_products: usize,
    pub percentage_reordered: f64,
}

/// Staple order lines placed in the morning and in the evening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StapleTimeOfDayReport {
    pub morning_count: usize,
    pub evening_count: usize,
}

/// Department diversity of orders and its correlation with basket size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentDiversityReport {
    pub average_departments: f64,
    pub correlation: f64,
}

/// Mean basket size on weekend and weekday orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekendBasketReport {
    pub avg_weekend: f64,
    pub avg_weekday: f64,
}

/// Bucket of an order's hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    /// 05:00 up to, not including, 12:00
    Morning,
    /// 17:00 through 23:59
    Evening,
    Other,
}

impl TimeOfDay {
    #[must_use]
    pub const fn from_hour(hour: i32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            17..=23 => Self::Evening,
            _ => Self::Other,
        }
    }
}

/// Day-of-week codes counted as weekend.
const WEEKEND_DAYS: [i32; 2] = [0, 1];

fn index_by<T, K, F>(rows: &[T], key: F) -> HashMap<K, Vec<&T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, Vec<&T>> = HashMap::new();
    for row in rows {
        index.entry(key(row)).or_default().push(row);
    }
    index
}

/// Matches for `key` in `index`, repeated per duplicate, empty when absent.
fn joined<'a, K, T>(index: &'a HashMap<K, Vec<&'a T>>, key: &K) -> impl Iterator<Item = &'a T>
where
    K: Eq + Hash,
{
    index.get(key).into_iter().flatten().copied()
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64 * 100.0
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample Pearson correlation. `NaN` with fewer than two points or zero variance.
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return f64::NAN;
    }
    let (mean_x, mean_y) = (mean(xs), mean(ys));
    let (mut covariance, mut variance_x, mut variance_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }
    covariance / (variance_x * variance_y).sqrt()
}

/// Counts orders whose joined products span exactly one distinct aisle name.
///
/// Lines join product → aisle → department; lines missing any side are dropped,
/// and orders with no surviving line are not counted.
#[must_use]
pub fn single_aisle_ratio(snapshot: &Snapshot) -> SingleAisleReport {
    let products = index_by(&snapshot.products, |product| product.product_id);
    let aisles = index_by(&snapshot.aisles, |aisle| aisle.aisle_id);
    let departments = index_by(&snapshot.departments, |department| {
        department.department_id
    });

    let mut order_aisles: HashMap<i64, HashSet<&str>> = HashMap::new();
    for line in &snapshot.order_products {
        for product in joined(&products, &line.product_id) {
            if !departments.contains_key(&product.department_id) {
                continue;
            }
            for aisle in joined(&aisles, &product.aisle_id) {
                order_aisles
                    .entry(line.order_id)
                    .or_default()
                    .insert(aisle.aisle.as_str());
            }
        }
    }

    let total_orders = order_aisles.len();
    let same_aisle_orders = order_aisles
        .values()
        .filter(|names| names.len() == 1)
        .count();

    SingleAisleReport {
        total_orders,
        same_aisle_orders,
        percentage_same_aisle: percentage(same_aisle_orders, total_orders),
    }
}

/// Share of all order lines flagged `reordered == 1`.
#[must_use]
pub fn reorder_ratio(snapshot: &Snapshot) -> ReorderReport {
    let total_products = snapshot.order_products.len();
    let reordered_products = snapshot
        .order_products
        .iter()
        .filter(|line| line.reordered == 1)
        .count();

    ReorderReport {
        total_products,
        reordered_products,
        percentage_reordered: percentage(reordered_products, total_products),
    }
}

/// Morning and evening counts of staple order lines, joined to their orders.
///
/// With [`StapleMatch::AisleIdAsProductId`] the staple aisle ids that occur on at
/// least one product are compared against each line's `product_id`, which is how
/// the report has historically been computed. [`StapleMatch::ProductAisle`] instead
/// selects lines whose product is shelved in a staple aisle.
#[must_use]
pub fn staple_time_of_day(
    snapshot: &Snapshot,
    staple_aisle_ids: &[i64],
    rule: StapleMatch,
) -> StapleTimeOfDayReport {
    let staple_aisles: HashSet<i64> = staple_aisle_ids.iter().copied().collect();
    let matched_ids: HashSet<i64> = snapshot
        .products
        .iter()
        .filter(|product| staple_aisles.contains(&product.aisle_id))
        .map(|product| match rule {
            StapleMatch::AisleIdAsProductId => product.aisle_id,
            StapleMatch::ProductAisle => product.product_id,
        })
        .collect();

    let orders = index_by(&snapshot.orders, |order| order.order_id);
    let mut report = StapleTimeOfDayReport {
        morning_count: 0,
        evening_count: 0,
    };
    for line in &snapshot.order_products {
        if !matched_ids.contains(&line.product_id) {
            continue;
        }
        for order in joined(&orders, &line.order_id) {
            match TimeOfDay::from_hour(order.order_hour_of_day) {
                TimeOfDay::Morning => report.morning_count += 1,
                TimeOfDay::Evening => report.evening_count += 1,
                TimeOfDay::Other => {}
            }
        }
    }
    report
}

/// Mean distinct-department count per order, and its correlation with line count.
#[must_use]
pub fn department_diversity(snapshot: &Snapshot) -> DepartmentDiversityReport {
    let products = index_by(&snapshot.products, |product| product.product_id);
    let departments = index_by(&snapshot.departments, |department| {
        department.department_id
    });

    let mut baskets: BTreeMap<i64, (usize, BTreeSet<i64>)> = BTreeMap::new();
    for line in &snapshot.order_products {
        for product in joined(&products, &line.product_id) {
            for department in joined(&departments, &product.department_id) {
                let (lines, distinct) = baskets.entry(line.order_id).or_default();
                *lines += 1;
                distinct.insert(department.department_id);
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let (line_counts, department_counts): (Vec<f64>, Vec<f64>) = baskets
        .values()
        .map(|(lines, distinct)| (*lines as f64, distinct.len() as f64))
        .unzip();

    DepartmentDiversityReport {
        average_departments: mean(&department_counts),
        correlation: pearson(&line_counts, &department_counts),
    }
}

/// Mean number of lines per order, split by weekend (day codes 0 and 1) and weekday.
#[must_use]
pub fn weekend_basket_size(snapshot: &Snapshot) -> WeekendBasketReport {
    let orders = index_by(&snapshot.orders, |order| order.order_id);

    let mut basket_sizes: BTreeMap<(i64, bool), usize> = BTreeMap::new();
    for line in &snapshot.order_products {
        for order in joined(&orders, &line.order_id) {
            let is_weekend = WEEKEND_DAYS.contains(&order.order_dow);
            *basket_sizes.entry((line.order_id, is_weekend)).or_default() += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let sizes_where = |weekend: bool| -> Vec<f64> {
        basket_sizes
            .iter()
            .filter(|((_, is_weekend), _)| *is_weekend == weekend)
            .map(|(_, size)| *size as f64)
            .collect()
    };

    WeekendBasketReport {
        avg_weekend: mean(&sizes_where(true)),
        avg_weekday: mean(&sizes_where(false)),
    }
}

/// Loads the dataset once and answers the five reports from memory.
///
/// The snapshot is cached for the engine's lifetime. Concurrent first calls wait on
/// one load instead of racing. [`ReportingEngine::reload`] replaces the snapshot.
pub struct ReportingEngine {
    database: Arc<DatabaseConnection>,
    config: ReportConfig,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl ReportingEngine {
    #[must_use]
    pub fn new(database: Arc<DatabaseConnection>, config: ReportConfig) -> Self {
        Self {
            database,
            config,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the cached snapshot, loading it on first use.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut slot = self.snapshot.write().await;
        if let Some(snapshot) = slot.as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        let snapshot = Arc::new(
            Snapshot::load(&self.database)
                .await
                .inspect_err(|e| warn!("Report snapshot load failed: {e}"))?,
        );
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Reads storage again and swaps in the new snapshot.
    ///
    /// On failure the previous snapshot, if any, stays in place.
    pub async fn reload(&self) -> Result<Arc<Snapshot>> {
        let mut slot = self.snapshot.write().await;
        let snapshot = Arc::new(Snapshot::load(&self.database).await?);
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub async fn single_aisle_ratio(&self) -> Result<SingleAisleReport> {
        Ok(single_aisle_ratio(&*self.snapshot().await?))
    }

    pub async fn reorder_ratio(&self) -> Result<ReorderReport> {
        Ok(reorder_ratio(&*self.snapshot().await?))
    }

    pub async fn staple_time_of_day(&self) -> Result<StapleTimeOfDayReport> {
        let snapshot = self.snapshot().await?;
        Ok(staple_time_of_day(
            &snapshot,
            &self.config.staple_aisle_ids,
            self.config.staple_match,
        ))
    }

    pub async fn department_diversity(&self) -> Result<DepartmentDiversityReport> {
        Ok(department_diversity(&*self.snapshot().await?))
    }

    pub async fn weekend_basket_size(&self) -> Result<WeekendBasketReport> {
        Ok(weekend_basket_size(&*self.snapshot().await?))
    }
}
