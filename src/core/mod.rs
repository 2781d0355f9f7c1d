//! Core business logic - framework-agnostic store operations and reports.
//!
//! Every store function takes the connection it should use, so the caller owns the
//! connection lifecycle. The HTTP layer in [`crate::api`] is a thin shell over these.

/// Aisle store operations
pub mod aisle;
/// Department store operations
pub mod department;
/// Order store operations
pub mod order;
/// Order line inserts
pub mod order_product;
/// Skip/limit validation and result pages
pub mod pagination;
/// Product store operations
pub mod product;
/// Bulk projection reads feeding the reporting engine
pub mod projection;
/// Output record shapes
pub mod records;
/// Descriptive reports over the whole dataset
pub mod report;

use crate::errors::{Error, Result};
use sea_orm::{ActiveValue, Set, Value};
use std::ops::RangeInclusive;

/// Rejects empty or whitespace-only text fields.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Rejects integers outside `range`.
pub(crate) fn require_range(field: &str, value: i32, range: RangeInclusive<i32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{field} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )))
    }
}

/// Writes `supplied` into `field` when it differs from the stored value.
///
/// Returns whether the field was changed. Unsupplied fields are left untouched.
pub(crate) fn set_if_changed<V>(field: &mut ActiveValue<V>, current: &V, supplied: Option<V>) -> bool
where
    V: Into<Value> + PartialEq,
{
    match supplied {
        Some(value) if value != *current => {
            *field = Set(value);
            true
        }
        _ => false,
    }
}
