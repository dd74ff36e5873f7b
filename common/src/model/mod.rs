//! Domain models

pub mod account;
