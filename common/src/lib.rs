//! Common types and utilities for the bank account service
//!
//! This library contains the shared types used by the account service and the
//! API gateway: the unified error type, the account domain model, decimal
//! aliases for monetary amounts, and database pool helpers.

pub mod db;
pub mod decimal;
pub mod error;
pub mod model;

/// Re-export important types
pub use decimal::*;
pub use error::{Error, ErrorExt, Result};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
