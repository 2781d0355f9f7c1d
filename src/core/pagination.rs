//! Skip/limit pagination.

use crate::errors::{Error, Result};
use serde::Serialize;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page size used when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A validated skip/limit pair: `skip >= 0` and `1 <= limit <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    skip: u64,
    limit: u64,
}

impl Pagination {
    /// Validates raw caller input.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when `skip` is negative or `limit` is outside `1..=100`.
    pub fn new(skip: i64, limit: i64) -> Result<Self> {
        Ok(Self {
            skip: checked_skip(skip)?,
            limit: checked_limit(limit)?,
        })
    }

    /// Like [`Pagination::new`], with `skip = 0` and `limit = 10` for missing values.
    pub fn from_query(skip: Option<i64>, limit: Option<i64>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            skip: skip.map(checked_skip).transpose()?.unwrap_or(defaults.skip),
            limit: limit.map(checked_limit).transpose()?.unwrap_or(defaults.limit),
        })
    }

    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

fn checked_skip(skip: i64) -> Result<u64> {
    u64::try_from(skip).map_err(|_| Error::validation(format!("skip must be >= 0, got {skip}")))
}

fn checked_limit(limit: i64) -> Result<u64> {
    u64::try_from(limit)
        .ok()
        .filter(|limit| (1..=MAX_PAGE_SIZE).contains(limit))
        .ok_or_else(|| {
            Error::validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}, got {limit}"
            ))
        })
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of records plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Number of records in the collection, not just on this page
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Builds a page from fetched rows, converting each one with `From`.
    pub fn from_models<M>(pagination: Pagination, total: u64, models: Vec<M>) -> Self
    where
        T: From<M>,
    {
        Self {
            total,
            skip: pagination.skip(),
            limit: pagination.limit(),
            items: models.into_iter().map(T::from).collect(),
        }
    }
}
