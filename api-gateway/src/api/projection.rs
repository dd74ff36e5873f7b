//! Response projections for account resources
//!
//! Callers pick how much of an account they want back through an explicit
//! `projection` query parameter; each level is its own view struct rather
//! than a dynamically filtered object.

use chrono::{DateTime, Utc};
use common::decimal::Amount;
use common::model::account::{Account, AccountType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Response detail level
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Only id and balance
    Minimal,
    /// Id, type, balance, and currency
    Summary,
    /// All fields
    #[default]
    Full,
}

/// Full account view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompteFull {
    /// Account ID
    pub id: Uuid,
    /// Account type
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Balance
    pub solde: Amount,
    /// Currency code
    pub devise: String,
    /// Creation timestamp
    #[serde(rename = "dateCreation")]
    pub date_creation: DateTime<Utc>,
}

/// Summary account view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompteSummary {
    /// Account ID
    pub id: Uuid,
    /// Account type
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Balance
    pub solde: Amount,
    /// Currency code
    pub devise: String,
}

/// Minimal account view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompteMinimal {
    /// Account ID
    pub id: Uuid,
    /// Balance
    pub solde: Amount,
}

impl From<Account> for CompteFull {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            account_type: account.account_type,
            solde: account.balance,
            devise: account.currency,
            date_creation: account.created_at,
        }
    }
}

impl From<Account> for CompteSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            account_type: account.account_type,
            solde: account.balance,
            devise: account.currency,
        }
    }
}

impl From<Account> for CompteMinimal {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            solde: account.balance,
        }
    }
}
