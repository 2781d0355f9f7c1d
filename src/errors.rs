//! Unified error type for the store, the reporting engine and the HTTP layer.
//!
//! Undefined numeric results (0/0 ratios, correlations over fewer than two orders)
//! are not errors: they travel as `f64::NAN` inside the report structs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Malformed id: {id}")]
    MalformedId { id: String },

    #[error("Update for {entity} contains no fields")]
    EmptyUpdate { entity: &'static str },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Storage connectivity or driver failure, passed through unmodified.
    #[error("Store unavailable: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
