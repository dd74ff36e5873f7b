//! Account service for managing bank accounts and their balance rules

pub mod config;
pub mod repository;
pub mod service;

pub use config::AccountServiceConfig;
pub use repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};
pub use service::AccountService;
pub use service::RepositoryType;
