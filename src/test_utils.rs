//! Shared test utilities.
//!
//! Helpers for setting up an in-memory store and building records with sensible defaults.

use crate::{
    core::{
        aisle::{self, NewAisle},
        department::{self, NewDepartment},
        order::NewOrder,
        product::NewProduct,
        records::{AisleRecord, DepartmentRecord},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Order input with sensible defaults.
///
/// # Defaults
/// * `eval_set`: `"prior"`
/// * `order_number`: 1
/// * `order_dow`: 2
/// * `order_hour_of_day`: 8
#[must_use]
pub fn sample_new_order(
    order_id: i64,
    user_id: i64,
    days_since_prior_order: Option<f64>,
) -> NewOrder {
    NewOrder {
        order_id,
        user_id,
        eval_set: "prior".to_string(),
        order_number: 1,
        order_dow: 2,
        order_hour_of_day: 8,
        days_since_prior_order,
    }
}

#[must_use]
pub fn sample_new_product(
    product_id: i64,
    product_name: &str,
    aisle_id: i64,
    department_id: i64,
) -> NewProduct {
    NewProduct {
        product_id,
        product_name: product_name.to_string(),
        aisle_id,
        department_id,
    }
}

pub async fn create_test_aisle(
    db: &DatabaseConnection,
    aisle_id: i64,
    name: &str,
) -> Result<AisleRecord> {
    aisle::create_aisle(
        db,
        NewAisle {
            aisle_id,
            aisle: name.to_string(),
        },
    )
    .await
}

pub async fn create_test_department(
    db: &DatabaseConnection,
    department_id: i64,
    name: &str,
) -> Result<DepartmentRecord> {
    department::create_department(
        db,
        NewDepartment {
            department_id,
            department: name.to_string(),
        },
    )
    .await
}
