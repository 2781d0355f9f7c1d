//! Order line inserts.
//!
//! Order lines have no CRUD surface of their own; they are loaded into the dataset
//! and read back in bulk by [`crate::core::projection`].

use crate::{
    core::require_range,
    entities::order_product,
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use serde::Deserialize;

/// One product line to attach to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NewOrderProduct {
    pub order_id: i64,
    pub product_id: i64,
    pub add_to_cart_order: i32,
    pub reordered: i32,
}

impl NewOrderProduct {
    pub fn validate(&self) -> Result<()> {
        if self.add_to_cart_order < 1 {
            return Err(Error::validation(format!(
                "add_to_cart_order must be >= 1, got {}",
                self.add_to_cart_order
            )));
        }
        require_range("reordered", self.reordered, 0..=1)
    }
}

/// Inserts an order line.
///
/// # Errors
/// Returns an error if validation fails or the `(order_id, product_id)` insert fails.
pub async fn add_order_product(
    db: &DatabaseConnection,
    line: NewOrderProduct,
) -> Result<order_product::Model> {
    line.validate()?;

    let active = order_product::ActiveModel {
        order_id: Set(line.order_id),
        product_id: Set(line.product_id),
        add_to_cart_order: Set(line.add_to_cart_order),
        reordered: Set(line.reordered),
    };
    active.insert(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_add_order_product() -> Result<()> {
        let db = setup_test_db().await?;
        let line = NewOrderProduct {
            order_id: 1,
            product_id: 49302,
            add_to_cart_order: 1,
            reordered: 1,
        };

        let stored = add_order_product(&db, line).await?;
        assert_eq!(stored.order_id, 1);
        assert_eq!(stored.product_id, 49302);
        assert_eq!(stored.reordered, 1);

        Ok(())
    }

    #[test]
    fn test_reordered_flag_must_be_binary() {
        let line = NewOrderProduct {
            order_id: 1,
            product_id: 2,
            add_to_cart_order: 1,
            reordered: 2,
        };
        assert!(matches!(line.validate(), Err(Error::Validation { .. })));

        let zero_position = NewOrderProduct {
            add_to_cart_order: 0,
            reordered: 0,
            ..line
        };
        assert!(matches!(
            zero_position.validate(),
            Err(Error::Validation { .. })
        ));
    }
}
