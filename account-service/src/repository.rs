//! Repository for account data

use async_trait::async_trait;
use common::db::{self, DbPool};
use common::decimal::Amount;
use common::error::{Error, Result};
use common::model::account::{Account, AccountType};
use dashmap::DashMap;
use sqlx::postgres::PgRow;
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;

/// Account repository trait defining the interface for account data storage
///
/// The repository is plain CRUD plus filter queries; all business rules live
/// in the service layer.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get all accounts
    async fn get_all(&self) -> Result<Vec<Account>>;

    /// Get an account by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Persist a new account
    async fn insert(&self, account: Account) -> Result<Account>;

    /// Persist changes to an existing account
    async fn update(&self, account: Account) -> Result<Account>;

    /// Delete an account, returning whether it existed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Find accounts with an exact type match
    async fn find_by_type(&self, account_type: AccountType) -> Result<Vec<Account>>;

    /// Find accounts with a balance inside the inclusive bounds
    ///
    /// Either bound may be omitted; omitting both returns every account.
    async fn find_by_balance_range(
        &self,
        min: Option<Amount>,
        max: Option<Amount>,
    ) -> Result<Vec<Account>>;
}

/// In-memory repository for account data
pub struct InMemoryAccountRepository {
    /// Accounts by ID
    pub accounts: DashMap<Uuid, Account>,
}

impl InMemoryAccountRepository {
    /// Create a new in-memory account repository
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get_all(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.iter().map(|a| a.value().clone()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.value().clone()))
    }

    async fn insert(&self, account: Account) -> Result<Account> {
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account> {
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.accounts.remove(&id).is_some())
    }

    async fn find_by_type(&self, account_type: AccountType) -> Result<Vec<Account>> {
        let accounts = self
            .accounts
            .iter()
            .filter(|a| a.account_type == account_type)
            .map(|a| a.value().clone())
            .collect();

        Ok(accounts)
    }

    async fn find_by_balance_range(
        &self,
        min: Option<Amount>,
        max: Option<Amount>,
    ) -> Result<Vec<Account>> {
        let accounts = self
            .accounts
            .iter()
            .filter(|a| min.map_or(true, |m| a.balance >= m))
            .filter(|a| max.map_or(true, |m| a.balance <= m))
            .map(|a| a.value().clone())
            .collect();

        Ok(accounts)
    }
}

/// PostgreSQL repository for account data
pub struct PostgresAccountRepository {
    /// Database connection pool
    pool: DbPool,
}

impl PostgresAccountRepository {
    /// Create a new PostgreSQL account repository
    pub async fn new(database_url: Option<String>) -> Result<Self> {
        let database_url = match database_url {
            Some(url) => url,
            None => std::env::var("DATABASE_URL")
                .map_err(|_| Error::ConfigurationError("DATABASE_URL must be set".to_string()))?,
        };

        let pool = db::connect(&database_url, 5).await?;
        info!("Connected to PostgreSQL database");

        db::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL account repository with configuration
    pub async fn with_config(config: &crate::config::AccountServiceConfig) -> Result<Self> {
        info!(
            "Connecting to PostgreSQL database with pool size: {}",
            config.db_pool_size
        );

        let pool = db::connect(&config.database_url, config.db_pool_size).await?;
        info!("Connected to PostgreSQL database");

        db::run_migrations(&pool).await?;

        Ok(Self { pool })
    }
}

/// Convert a database row into an Account
fn row_to_account(row: &PgRow) -> Result<Account> {
    let type_str: String = row.get("account_type");
    let account_type = type_str
        .parse::<AccountType>()
        .map_err(|e| Error::Internal(format!("Invalid account type in database: {}", e)))?;

    Ok(Account {
        id: row.get("id"),
        account_type,
        balance: row.get("balance"),
        currency: row.get("currency"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn get_all(&self) -> Result<Vec<Account>> {
        debug!("Getting all accounts from database");

        let rows = sqlx::query(
            "SELECT id, account_type, balance, currency, created_at
             FROM comptes
             ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_account).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        debug!("Getting account from database: {}", id);

        let row = sqlx::query(
            "SELECT id, account_type, balance, currency, created_at
             FROM comptes
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, account: Account) -> Result<Account> {
        debug!("Inserting account into database: {}", account.id);

        sqlx::query(
            "INSERT INTO comptes (id, account_type, balance, currency, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.id)
        .bind(account.account_type.to_string())
        .bind(account.balance)
        .bind(&account.currency)
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account> {
        debug!("Updating account in database: {}", account.id);

        let result = sqlx::query(
            "UPDATE comptes
             SET account_type = $2, balance = $3, currency = $4
             WHERE id = $1",
        )
        .bind(account.id)
        .bind(account.account_type.to_string())
        .bind(account.balance)
        .bind(&account.currency)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::AccountNotFound(account.id.to_string()));
        }

        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        debug!("Deleting account from database: {}", id);

        let result = sqlx::query("DELETE FROM comptes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_type(&self, account_type: AccountType) -> Result<Vec<Account>> {
        debug!("Finding accounts by type: {}", account_type);

        let rows = sqlx::query(
            "SELECT id, account_type, balance, currency, created_at
             FROM comptes
             WHERE account_type = $1
             ORDER BY created_at",
        )
        .bind(account_type.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_account).collect()
    }

    async fn find_by_balance_range(
        &self,
        min: Option<Amount>,
        max: Option<Amount>,
    ) -> Result<Vec<Account>> {
        debug!("Finding accounts by balance range: {:?}..{:?}", min, max);

        let rows = match (min, max) {
            (Some(min), Some(max)) => {
                sqlx::query(
                    "SELECT id, account_type, balance, currency, created_at
                     FROM comptes
                     WHERE balance >= $1 AND balance <= $2
                     ORDER BY created_at",
                )
                .bind(min)
                .bind(max)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(min), None) => {
                sqlx::query(
                    "SELECT id, account_type, balance, currency, created_at
                     FROM comptes
                     WHERE balance >= $1
                     ORDER BY created_at",
                )
                .bind(min)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(max)) => {
                sqlx::query(
                    "SELECT id, account_type, balance, currency, created_at
                     FROM comptes
                     WHERE balance <= $1
                     ORDER BY created_at",
                )
                .bind(max)
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query(
                    "SELECT id, account_type, balance, currency, created_at
                     FROM comptes
                     ORDER BY created_at",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(row_to_account).collect()
    }
}
