//! REST API handlers and response projections

pub mod compte;
pub mod projection;
