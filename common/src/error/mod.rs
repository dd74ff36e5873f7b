//! Error types for the bank account service
//!
//! This module provides a unified error handling system shared by the account
//! service and the API gateway. Domain rule violations get their own variants
//! so the presentation layer can translate each one to a distinct status code.

use std::fmt::Display;
use thiserror::Error;

/// Bank account service error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error when an account cannot be found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Error when a transaction amount is zero or negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when a withdrawal exceeds the current balance
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Error when a savings account would hold a negative balance
    #[error("Negative balance not allowed: {0}")]
    NegativeBalance(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::AccountNotFound(msg) => {
                    Error::AccountNotFound(format!("{}: {}", context, msg))
                }
                Error::InvalidAmount(msg) => Error::InvalidAmount(format!("{}: {}", context, msg)),
                Error::InsufficientFunds(msg) => {
                    Error::InsufficientFunds(format!("{}: {}", context, msg))
                }
                Error::NegativeBalance(msg) => {
                    Error::NegativeBalance(format!("{}: {}", context, msg))
                }
                Error::ValidationError(msg) => {
                    Error::ValidationError(format!("{}: {}", context, msg))
                }
                Error::ConfigurationError(msg) => {
                    Error::ConfigurationError(format!("{}: {}", context, msg))
                }
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::Database(e) => Error::Database(e),
                Error::Migration(e) => Error::Migration(e),
            }
        })
    }
}

/// Convert string messages into an error
impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Internal(message)
    }
}

/// Convert static string references into an error
impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Internal(message.to_string())
    }
}
