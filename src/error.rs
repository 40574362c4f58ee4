//! Error types for the job tracker.
//!
//! Most pipeline failures are soft: the fetcher downgrades to an empty
//! result, the store substitutes a fresh database, the notifier returns
//! `false`. `AppError` covers the cases that still need a typed error.

use thiserror::Error;

/// Domain-specific errors for tracker operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Job store read/write failed
    #[error("Store error: {0}")]
    StoreError(String),

    /// Company list could not be read
    #[error("Company list error: {0}")]
    CompanyListError(String),
}

impl AppError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
