//! GraphQL types for the account schema
//!
//! Output and input types are kept separate from the domain model; inputs
//! carry different optionality and defaults.

use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use common::decimal::Amount;
use common::model::account::{Account, AccountType, DEFAULT_CURRENCY};
use uuid::Uuid;

/// Account output type
#[derive(Debug, SimpleObject)]
pub struct Compte {
    /// Account ID
    pub id: Uuid,
    /// Balance
    pub solde: Amount,
    /// Creation timestamp
    #[graphql(name = "dateCreation")]
    pub date_creation: DateTime<Utc>,
    /// Account type
    #[graphql(name = "type")]
    pub account_type: AccountType,
    /// Currency code
    pub devise: String,
}

impl From<Account> for Compte {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            solde: account.balance,
            date_creation: account.created_at,
            account_type: account.account_type,
            devise: account.currency,
        }
    }
}

/// Input for creating an account
#[derive(Debug, InputObject)]
pub struct CompteCreateInput {
    /// Opening balance
    pub solde: Amount,
    /// Account type
    #[graphql(name = "type")]
    pub account_type: AccountType,
    /// Currency code
    #[graphql(default_with = "DEFAULT_CURRENCY.to_string()")]
    pub devise: String,
}

/// Input for updating an account; absent fields are left unchanged
#[derive(Debug, InputObject)]
pub struct CompteUpdateInput {
    /// New balance
    pub solde: Option<Amount>,
    /// New account type
    #[graphql(name = "type")]
    pub account_type: Option<AccountType>,
    /// New currency code
    pub devise: Option<String>,
}
