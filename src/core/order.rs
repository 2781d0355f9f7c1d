//! Order business logic - Handles all order-related store operations.
//!
//! Provides paginated listing, lookup by id, creation, merge-style partial updates
//! and deletion. All functions are async and return Result types for error handling.

use crate::{
    core::{
        pagination::{Page, Pagination},
        records::{OrderRecord, parse_record_id},
        require_non_empty, require_range, set_if_changed,
    },
    entities::{Order, order},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

const ENTITY: &str = "Order";

/// Fields accepted when creating an order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewOrder {
    pub order_id: i64,
    pub user_id: i64,
    pub eval_set: String,
    pub order_number: i32,
    pub order_dow: i32,
    pub order_hour_of_day: i32,
    #[serde(default)]
    pub days_since_prior_order: Option<f64>,
}

impl NewOrder {
    /// Checks field ranges before anything is written.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("eval_set", &self.eval_set)?;
        validate_schedule(Some(self.order_dow), Some(self.order_hour_of_day))?;
        validate_days_since_prior(self.days_since_prior_order)
    }
}

/// Partial order update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderPatch {
    pub eval_set: Option<String>,
    pub order_number: Option<i32>,
    pub order_dow: Option<i32>,
    pub order_hour_of_day: Option<i32>,
    pub days_since_prior_order: Option<f64>,
}

impl OrderPatch {
    /// True when no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.eval_set.is_none()
            && self.order_number.is_none()
            && self.order_dow.is_none()
            && self.order_hour_of_day.is_none()
            && self.days_since_prior_order.is_none()
    }

    /// Checks the supplied fields only.
    pub fn validate(&self) -> Result<()> {
        if let Some(eval_set) = &self.eval_set {
            require_non_empty("eval_set", eval_set)?;
        }
        validate_schedule(self.order_dow, self.order_hour_of_day)?;
        validate_days_since_prior(self.days_since_prior_order)
    }
}

fn validate_schedule(order_dow: Option<i32>, order_hour_of_day: Option<i32>) -> Result<()> {
    if let Some(dow) = order_dow {
        require_range("order_dow", dow, 0..=6)?;
    }
    if let Some(hour) = order_hour_of_day {
        require_range("order_hour_of_day", hour, 0..=23)?;
    }
    Ok(())
}

fn validate_days_since_prior(days: Option<f64>) -> Result<()> {
    match days {
        Some(days) if !days.is_finite() || days < 0.0 => Err(Error::validation(format!(
            "days_since_prior_order must be a non-negative number, got {days}"
        ))),
        _ => Ok(()),
    }
}

/// Lists one page of orders in storage order, with the collection's total size.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_orders(
    db: &DatabaseConnection,
    pagination: Pagination,
) -> Result<Page<OrderRecord>> {
    debug!(
        skip = pagination.skip(),
        limit = pagination.limit(),
        "Listing orders"
    );
    let models = Order::find()
        .order_by_asc(order::Column::Id)
        .offset(pagination.skip())
        .limit(pagination.limit())
        .all(db)
        .await?;
    let total = Order::find().count(db).await?;
    Ok(Page::from_models(pagination, total, models))
}

/// Finds an order by its id, returning None if it does not exist.
///
/// # Errors
/// Returns an error if the id is malformed or the database query fails.
pub async fn get_order(db: &DatabaseConnection, id: &str) -> Result<Option<OrderRecord>> {
    let key = parse_record_id(id)?;
    Ok(Order::find_by_id(key).one(db).await?.map(OrderRecord::from))
}

/// Inserts a new order and returns it as stored.
///
/// # Errors
/// Returns an error if validation fails or the database insert fails.
pub async fn create_order(db: &DatabaseConnection, new_order: NewOrder) -> Result<OrderRecord> {
    new_order.validate()?;

    let order = order::ActiveModel {
        order_id: Set(new_order.order_id),
        user_id: Set(new_order.user_id),
        eval_set: Set(new_order.eval_set),
        order_number: Set(new_order.order_number),
        order_dow: Set(new_order.order_dow),
        order_hour_of_day: Set(new_order.order_hour_of_day),
        days_since_prior_order: Set(new_order.days_since_prior_order),
        ..Default::default()
    };
    let model = order.insert(db).await?;
    info!(id = model.id, order_id = model.order_id, "Order created");
    Ok(model.into())
}

/// Merges the supplied fields into an existing order.
///
/// Returns `true` only if at least one stored value changed. A missing order, or a
/// patch whose values all equal the stored ones, yields `false`.
///
/// # Errors
/// Returns an error if:
/// - The id is malformed
/// - The patch is empty or contains invalid values (checked before any query)
/// - The database update fails
pub async fn update_order(db: &DatabaseConnection, id: &str, patch: OrderPatch) -> Result<bool> {
    let key = parse_record_id(id)?;
    if patch.is_empty() {
        return Err(Error::EmptyUpdate { entity: ENTITY });
    }
    patch.validate()?;

    let Some(current) = Order::find_by_id(key).one(db).await? else {
        debug!(id = key, "Order not found for update");
        return Ok(false);
    };

    let mut order: order::ActiveModel = current.clone().into();
    let mut changed = false;
    changed |= set_if_changed(&mut order.eval_set, &current.eval_set, patch.eval_set);
    changed |= set_if_changed(
        &mut order.order_number,
        &current.order_number,
        patch.order_number,
    );
    changed |= set_if_changed(&mut order.order_dow, &current.order_dow, patch.order_dow);
    changed |= set_if_changed(
        &mut order.order_hour_of_day,
        &current.order_hour_of_day,
        patch.order_hour_of_day,
    );
    changed |= set_if_changed(
        &mut order.days_since_prior_order,
        &current.days_since_prior_order,
        patch.days_since_prior_order.map(Some),
    );

    if changed {
        order.update(db).await?;
        info!(id = key, "Order updated");
    }
    Ok(changed)
}

/// Deletes an order, returning whether a row was removed.
///
/// # Errors
/// Returns an error if the id is malformed or the database delete fails.
pub async fn delete_order(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let key = parse_record_id(id)?;
    let result = Order::delete_by_id(key).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_then_get_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let input = sample_new_order(2_539_329, 1, Some(15.0));

        let created = create_order(&db, input.clone()).await?;
        let fetched = get_order(&db, &created.id).await?.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.order_id, input.order_id);
        assert_eq!(fetched.user_id, input.user_id);
        assert_eq!(fetched.eval_set, input.eval_set);
        assert_eq!(fetched.order_number, input.order_number);
        assert_eq!(fetched.order_dow, input.order_dow);
        assert_eq!(fetched.order_hour_of_day, input.order_hour_of_day);
        assert_eq!(fetched.days_since_prior_order, Some(15.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_first_order_keeps_absent_days() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_order(&db, sample_new_order(1, 1, None)).await?;

        let fetched = get_order(&db, &created.id).await?.unwrap();
        assert_eq!(fetched.days_since_prior_order, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut bad_dow = sample_new_order(1, 1, None);
        bad_dow.order_dow = 7;
        assert!(matches!(
            create_order(&db, bad_dow).await,
            Err(Error::Validation { .. })
        ));

        let mut bad_hour = sample_new_order(1, 1, None);
        bad_hour.order_hour_of_day = 24;
        assert!(matches!(
            create_order(&db, bad_hour).await,
            Err(Error::Validation { .. })
        ));

        let mut bad_days = sample_new_order(1, 1, Some(-2.0));
        assert!(matches!(
            create_order(&db, bad_days.clone()).await,
            Err(Error::Validation { .. })
        ));
        bad_days.days_since_prior_order = Some(f64::NAN);
        assert!(matches!(
            create_order(&db, bad_days).await,
            Err(Error::Validation { .. })
        ));

        let mut blank_eval_set = sample_new_order(1, 1, None);
        blank_eval_set.eval_set = "  ".to_string();
        assert!(matches!(
            create_order(&db, blank_eval_set).await,
            Err(Error::Validation { .. })
        ));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_pages_and_counts_whole_collection() -> Result<()> {
        let db = setup_test_db().await?;
        for order_id in 1..=5 {
            create_order(&db, sample_new_order(order_id, 1, None)).await?;
        }

        let page = list_orders(&db, Pagination::new(1, 2)?).await?;
        assert_eq!(page.total, 5);
        assert_eq!(page.skip, 1);
        assert_eq!(page.limit, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].order_id, 2);
        assert_eq!(page.items[1].order_id, 3);

        let tail = list_orders(&db, Pagination::new(4, 100)?).await?;
        assert_eq!(tail.items.len(), 1);
        assert!(tail.total >= tail.items.len() as u64);

        let past_end = list_orders(&db, Pagination::new(50, 10)?).await?;
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_not_found_and_malformed() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(get_order(&db, "999").await?.is_none());
        assert!(matches!(
            get_order(&db, "not-an-id").await,
            Err(Error::MalformedId { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_merges_supplied_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_order(&db, sample_new_order(10, 3, Some(8.0))).await?;

        let patch = OrderPatch {
            order_hour_of_day: Some(21),
            ..Default::default()
        };
        assert!(update_order(&db, &created.id, patch).await?);

        let updated = get_order(&db, &created.id).await?.unwrap();
        assert_eq!(updated.order_hour_of_day, 21);
        assert_eq!(updated.eval_set, created.eval_set);
        assert_eq!(updated.order_dow, created.order_dow);
        assert_eq!(updated.order_number, created.order_number);
        assert_eq!(updated.days_since_prior_order, Some(8.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_same_values_reports_no_change() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_order(&db, sample_new_order(10, 3, None)).await?;

        let patch = OrderPatch {
            order_dow: Some(created.order_dow),
            ..Default::default()
        };
        assert!(!update_order(&db, &created.id, patch).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_order_returns_false() -> Result<()> {
        let db = setup_test_db().await?;
        let patch = OrderPatch {
            eval_set: Some("train".to_string()),
            ..Default::default()
        };
        assert!(!update_order(&db, "12345", patch).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_update_rejected_without_touching_storage() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = update_order(&db, "1", OrderPatch::default()).await;
        assert!(matches!(result, Err(Error::EmptyUpdate { entity: "Order" })));

        let invalid = OrderPatch {
            order_dow: Some(9),
            ..Default::default()
        };
        assert!(matches!(
            update_order(&db, "1", invalid).await,
            Err(Error::Validation { .. })
        ));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_order() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_order(&db, sample_new_order(77, 4, None)).await?;

        assert!(delete_order(&db, &created.id).await?);
        assert!(get_order(&db, &created.id).await?.is_none());
        assert!(!delete_order(&db, &created.id).await?);

        Ok(())
    }

    #[test]
    fn test_patch_deserializes_missing_and_null_as_unset() {
        let patch: OrderPatch =
            serde_json::from_str(r#"{"eval_set": null, "order_number": 4}"#).unwrap();
        assert_eq!(patch.eval_set, None);
        assert_eq!(patch.order_number, Some(4));
        assert!(!patch.is_empty());

        let empty: OrderPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
