//! Output shapes returned by single-record and paginated reads.
//!
//! The storage id becomes a display string and every other field is copied as is,
//! except that a NaN `days_since_prior_order` becomes absent.

use crate::{
    entities::{aisle, department, order, product},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// Parses a display id back into the storage key.
///
/// # Errors
/// Returns [`Error::MalformedId`] unless `id` is a positive integer.
pub fn parse_record_id(id: &str) -> Result<i64> {
    id.parse::<i64>()
        .ok()
        .filter(|key| *key > 0)
        .ok_or_else(|| Error::MalformedId { id: id.to_string() })
}

/// An order as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub order_id: i64,
    pub user_id: i64,
    pub eval_set: String,
    pub order_number: i32,
    pub order_dow: i32,
    pub order_hour_of_day: i32,
    pub days_since_prior_order: Option<f64>,
}

impl From<order::Model> for OrderRecord {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id.to_string(),
            order_id: model.order_id,
            user_id: model.user_id,
            eval_set: model.eval_set,
            order_number: model.order_number,
            order_dow: model.order_dow,
            order_hour_of_day: model.order_hour_of_day,
            days_since_prior_order: model.days_since_prior_order.filter(|days| !days.is_nan()),
        }
    }
}

/// An aisle as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AisleRecord {
    pub id: String,
    pub aisle_id: i64,
    pub aisle: String,
}

impl From<aisle::Model> for AisleRecord {
    fn from(model: aisle::Model) -> Self {
        Self {
            id: model.id.to_string(),
            aisle_id: model.aisle_id,
            aisle: model.aisle,
        }
    }
}

/// A department as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub id: String,
    pub department_id: i64,
    pub department: String,
}

impl From<department::Model> for DepartmentRecord {
    fn from(model: department::Model) -> Self {
        Self {
            id: model.id.to_string(),
            department_id: model.department_id,
            department: model.department,
        }
    }
}

/// A product as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub product_id: i64,
    pub product_name: String,
    pub aisle_id: i64,
    pub department_id: i64,
}

impl From<product::Model> for ProductRecord {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id.to_string(),
            product_id: model.product_id,
            product_name: model.product_name,
            aisle_id: model.aisle_id,
            department_id: model.department_id,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn order_model(days_since_prior_order: Option<f64>) -> order::Model {
        order::Model {
            id: 42,
            order_id: 2_539_329,
            user_id: 1,
            eval_set: "prior".to_string(),
            order_number: 1,
            order_dow: 2,
            order_hour_of_day: 8,
            days_since_prior_order,
        }
    }

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("17").unwrap(), 17);
        for bad in ["", "abc", "0", "-3", "65f1c0ffee", "1.5", " 5 ", "5\n"] {
            assert!(
                matches!(parse_record_id(bad), Err(Error::MalformedId { .. })),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_order_nan_days_becomes_absent() {
        let record = OrderRecord::from(order_model(Some(f64::NAN)));
        assert_eq!(record.days_since_prior_order, None);
    }

    #[test]
    fn test_order_numeric_days_pass_through() {
        assert_eq!(
            OrderRecord::from(order_model(Some(15.0))).days_since_prior_order,
            Some(15.0)
        );
        assert_eq!(
            OrderRecord::from(order_model(Some(0.0))).days_since_prior_order,
            Some(0.0)
        );
        assert_eq!(OrderRecord::from(order_model(None)).days_since_prior_order, None);
    }

    #[test]
    fn test_order_fields_copied_and_id_stringified() {
        let record = OrderRecord::from(order_model(Some(7.0)));
        assert_eq!(record.id, "42");
        assert_eq!(record.order_id, 2_539_329);
        assert_eq!(record.user_id, 1);
        assert_eq!(record.eval_set, "prior");
        assert_eq!(record.order_number, 1);
        assert_eq!(record.order_dow, 2);
        assert_eq!(record.order_hour_of_day, 8);
    }

    #[test]
    fn test_absent_days_serializes_as_null() {
        let json = serde_json::to_value(OrderRecord::from(order_model(Some(f64::NAN)))).unwrap();
        assert!(json["days_since_prior_order"].is_null());
    }

    #[test]
    fn test_product_record_keeps_natural_keys() {
        let record = ProductRecord::from(product::Model {
            id: 3,
            product_id: 24852,
            product_name: "Banana".to_string(),
            aisle_id: 24,
            department_id: 4,
        });
        assert_eq!(record.id, "3");
        assert_eq!(record.product_id, 24852);
        assert_eq!(record.aisle_id, 24);
        assert_eq!(record.department_id, 4);
    }

    #[test]
    fn test_aisle_and_department_records() {
        let aisle = AisleRecord::from(aisle::Model {
            id: 1,
            aisle_id: 24,
            aisle: "fresh fruits".to_string(),
        });
        assert_eq!(aisle.id, "1");
        assert_eq!(aisle.aisle, "fresh fruits");

        let department = DepartmentRecord::from(department::Model {
            id: 9,
            department_id: 4,
            department: "produce".to_string(),
        });
        assert_eq!(department.id, "9");
        assert_eq!(department.department_id, 4);
    }
}
