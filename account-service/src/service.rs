//! Account service implementation
//!
//! All business rules live here: the savings non-negative invariant, the
//! transaction amount checks, and the funds check on withdrawals. The
//! repository underneath is plain storage.

use std::sync::Arc;

use common::decimal::Amount;
use common::error::{Error, ErrorExt, Result};
use common::model::account::{Account, AccountPatch, AccountType, NewAccount};
use tracing::{debug, info};
use uuid::Uuid;

use crate::repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};

/// Account service for managing bank accounts
pub struct AccountService {
    /// Repository for account data
    repo: Arc<dyn AccountRepository>,
}

/// Repository Type
pub enum RepositoryType {
    /// In-memory repository
    InMemory,
    /// PostgreSQL repository
    Postgres(Option<String>),
}

impl AccountService {
    /// Create a new account service backed by the in-memory repository
    pub fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryAccountRepository::new()),
        }
    }

    /// Create a new account service with a specific repository type
    pub async fn with_repository(repo_type: RepositoryType) -> Result<Self> {
        let repo: Arc<dyn AccountRepository> = match repo_type {
            RepositoryType::InMemory => Arc::new(InMemoryAccountRepository::new()),
            RepositoryType::Postgres(database_url) => {
                Arc::new(PostgresAccountRepository::new(database_url).await?)
            }
        };

        Ok(Self { repo })
    }

    /// Create a new account service with a configuration
    pub async fn with_config(config: &crate::config::AccountServiceConfig) -> Result<Self> {
        let repo: Arc<dyn AccountRepository> =
            Arc::new(PostgresAccountRepository::with_config(config).await?);

        Ok(Self { repo })
    }

    /// Get all accounts, in no guaranteed order
    pub async fn get_all(&self) -> Result<Vec<Account>> {
        debug!("Getting all accounts");
        self.repo.get_all().await
    }

    /// Get an account by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Account> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::AccountNotFound(id.to_string()))
    }

    /// Create a new account
    ///
    /// A savings account cannot open with a negative balance; a current
    /// account can open with any balance.
    pub async fn create(&self, new_account: NewAccount) -> Result<Account> {
        info!("Creating new {} account", new_account.account_type);

        if new_account.account_type == AccountType::Savings
            && new_account.balance < Amount::ZERO
        {
            return Err(Error::NegativeBalance(format!(
                "Savings accounts cannot open with balance {}",
                new_account.balance
            )));
        }

        self.repo.insert(Account::new(new_account)).await
    }

    /// Update an existing account with a partial set of fields
    ///
    /// The savings rule is validated against the effective post-update type
    /// and balance: supplied fields override, absent fields keep their
    /// current value.
    pub async fn update(&self, id: Uuid, patch: AccountPatch) -> Result<Account> {
        info!("Updating account {}", id);

        let mut account = self.get_by_id(id).await?;

        let effective_type = patch.account_type.unwrap_or(account.account_type);
        let effective_balance = patch.balance.unwrap_or(account.balance);

        if effective_type == AccountType::Savings && effective_balance < Amount::ZERO {
            return Err(Error::NegativeBalance(format!(
                "Savings account {} cannot hold balance {}",
                id, effective_balance
            )));
        }

        account.apply_patch(patch);
        self.repo.update(account).await
    }

    /// Delete an account permanently
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        info!("Deleting account {}", id);

        if self.repo.delete(id).await? {
            return Ok(());
        }
        Err(Error::AccountNotFound(id.to_string()))
    }

    /// Find accounts with an exact type match
    pub async fn find_by_type(&self, account_type: AccountType) -> Result<Vec<Account>> {
        debug!("Finding accounts by type {}", account_type);
        self.repo.find_by_type(account_type).await
    }

    /// Find accounts with a balance inside the inclusive bounds
    pub async fn find_by_balance_range(
        &self,
        min: Option<Amount>,
        max: Option<Amount>,
    ) -> Result<Vec<Account>> {
        debug!("Finding accounts by balance range {:?}..{:?}", min, max);
        self.repo.find_by_balance_range(min, max).await
    }

    /// Deposit money into an account
    ///
    /// The amount must be strictly positive; there is no upper bound.
    pub async fn deposit(&self, id: Uuid, amount: Amount) -> Result<Account> {
        info!("Depositing {} into account {}", amount, id);

        if amount <= Amount::ZERO {
            return Err(Error::InvalidAmount(format!(
                "Deposit amount must be positive, got {}",
                amount
            )));
        }

        let mut account = self.get_by_id(id).await?;
        account.balance += amount;
        self.repo
            .update(account)
            .await
            .with_context(|| format!("Failed to update balance after deposit for account {}", id))
    }

    /// Withdraw money from an account
    ///
    /// The funds check applies to both account types and fires before the
    /// savings rule, so withdrawing more than the balance fails with
    /// `InsufficientFunds` even when the savings rule would also reject it.
    pub async fn withdraw(&self, id: Uuid, amount: Amount) -> Result<Account> {
        info!("Withdrawing {} from account {}", amount, id);

        if amount <= Amount::ZERO {
            return Err(Error::InvalidAmount(format!(
                "Withdrawal amount must be positive, got {}",
                amount
            )));
        }

        let mut account = self.get_by_id(id).await?;

        if account.balance < amount {
            return Err(Error::InsufficientFunds(format!(
                "Balance: {}, Requested: {}",
                account.balance, amount
            )));
        }

        let new_balance = account.balance - amount;

        // Normally unreachable: the funds check above already rejects any
        // withdrawal that would take a savings balance below zero. Kept, in
        // this order, to preserve the historical error taxonomy.
        if account.account_type == AccountType::Savings && new_balance < Amount::ZERO {
            return Err(Error::NegativeBalance(format!(
                "Savings account {} cannot hold balance {}",
                id, new_balance
            )));
        }

        account.balance = new_balance;
        self.repo
            .update(account)
            .await
            .with_context(|| format!("Failed to update balance after withdrawal for account {}", id))
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}
