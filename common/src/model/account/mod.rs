//! Account model and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Amount;
use crate::error::Error;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Default currency code for newly created accounts
pub const DEFAULT_CURRENCY: &str = "MAD";

/// Account type, wire values "CURRENT" and "SAVINGS"
///
/// The type is business-meaningful: a savings account must never hold a
/// negative balance, while a current account may be overdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
pub enum AccountType {
    /// Overdraft permitted
    Current,
    /// Balance must stay non-negative
    Savings,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Current => write!(f, "CURRENT"),
            AccountType::Savings => write!(f, "SAVINGS"),
        }
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CURRENT" => Ok(AccountType::Current),
            "SAVINGS" => Ok(AccountType::Savings),
            other => Err(Error::ValidationError(format!(
                "Unknown account type: {}",
                other
            ))),
        }
    }
}

/// Account model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account ID
    pub id: Uuid,
    /// Account type
    pub account_type: AccountType,
    /// Current balance
    pub balance: Amount,
    /// Currency code (free text, e.g. "MAD")
    pub currency: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh ID and the current timestamp
    pub fn new(new_account: NewAccount) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_type: new_account.account_type,
            balance: new_account.balance,
            currency: new_account.currency,
            created_at: Utc::now(),
        }
    }

    /// Apply the supplied fields of a partial update, leaving the rest intact
    pub fn apply_patch(&mut self, patch: AccountPatch) {
        if let Some(account_type) = patch.account_type {
            self.account_type = account_type;
        }
        if let Some(balance) = patch.balance {
            self.balance = balance;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
    }
}

/// Fields for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Account type
    pub account_type: AccountType,
    /// Opening balance
    pub balance: Amount,
    /// Currency code
    pub currency: String,
}

/// Partial update of an account; absent fields retain their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountPatch {
    /// New account type, if changing
    pub account_type: Option<AccountType>,
    /// New balance, if changing
    pub balance: Option<Amount>,
    /// New currency code, if changing
    pub currency: Option<String>,
}
