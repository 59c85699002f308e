//! The module contains the errors the engine can throw.
//!
//! - [`InvalidEntry`] thrown when a record to insert is not well formed.
//! - [`TotalOverflow`] thrown when a category or grand total no longer fits
//!   in an `i64`.
//! - [`Database`] wraps any failure of the persistence backend. Callers treat
//!   it as retryable; the engine never retries on its own.
//!
//!  [`InvalidEntry`]: EngineError::InvalidEntry
//!  [`TotalOverflow`]: EngineError::TotalOverflow
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    #[error("Total overflow for category {0}")]
    TotalOverflow(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidEntry(a), Self::InvalidEntry(b)) => a == b,
            (Self::TotalOverflow(a), Self::TotalOverflow(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
