//! Account API handlers
//!
//! Handles the REST surface for bank accounts:
//! - List accounts (with projection selection)
//! - Search by type or balance range
//! - CRUD on a single account
//! - Deposit and withdraw transactions

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::decimal::Amount;
use common::model::account::{AccountPatch, AccountType, NewAccount, DEFAULT_CURRENCY};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::projection::{CompteFull, CompteMinimal, CompteSummary, Projection};
use crate::error::ApiError;
use crate::AppState;

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Response detail level
    #[serde(default)]
    pub projection: Projection,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Exact account type match
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    /// Inclusive lower balance bound
    pub min_solde: Option<Amount>,
    /// Inclusive upper balance bound
    pub max_solde: Option<Amount>,
}

/// Create account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCompteRequest {
    /// Account type
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Opening balance, defaults to zero
    #[serde(default)]
    pub solde: Amount,
    /// Currency code, defaults to "MAD"
    #[serde(default = "default_devise")]
    pub devise: String,
}

fn default_devise() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Update account request; absent fields are left unchanged
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCompteRequest {
    /// New account type
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    /// New balance
    pub solde: Option<Amount>,
    /// New currency code
    pub devise: Option<String>,
}

/// Deposit/withdraw request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionRequest {
    /// Amount, must be strictly positive
    pub amount: Amount,
}

/// List all accounts with the requested projection
#[utoipa::path(
    get,
    path = "/api/v1/comptes/",
    params(
        ("projection" = Option<String>, Query, description = "Response detail level: minimal, summary, or full (default)")
    ),
    responses(
        (status = 200, description = "Accounts retrieved successfully"),
        (status = 500, description = "Internal server error")
    ),
    tag = "compte"
)]
pub async fn list_comptes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let comptes = state.account_service.get_all().await?;

    // Each projection level is a distinct response shape
    let response = match query.projection {
        Projection::Minimal => Json(
            comptes
                .into_iter()
                .map(CompteMinimal::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Projection::Summary => Json(
            comptes
                .into_iter()
                .map(CompteSummary::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Projection::Full => Json(
            comptes
                .into_iter()
                .map(CompteFull::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
    };

    Ok(response)
}

/// Search accounts by type or balance range
///
/// Type takes priority over the balance range when both are given; at least
/// one criterion is required.
#[utoipa::path(
    get,
    path = "/api/v1/comptes/search",
    params(
        ("type" = Option<String>, Query, description = "Exact account type match (CURRENT or SAVINGS)"),
        ("min_solde" = Option<String>, Query, description = "Inclusive lower balance bound"),
        ("max_solde" = Option<String>, Query, description = "Inclusive upper balance bound")
    ),
    responses(
        (status = 200, description = "Matching accounts retrieved successfully"),
        (status = 400, description = "No search criterion given"),
        (status = 500, description = "Internal server error")
    ),
    tag = "compte"
)]
pub async fn search_comptes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CompteFull>>, ApiError> {
    let comptes = if let Some(account_type) = query.account_type {
        state.account_service.find_by_type(account_type).await?
    } else if query.min_solde.is_some() || query.max_solde.is_some() {
        state
            .account_service
            .find_by_balance_range(query.min_solde, query.max_solde)
            .await?
    } else {
        return Err(ApiError::BadRequest(
            "Must provide at least one search criterion (type, min_solde, or max_solde)"
                .to_string(),
        ));
    };

    Ok(Json(comptes.into_iter().map(CompteFull::from).collect()))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/api/v1/comptes/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = CompteFull),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "compte"
)]
pub async fn get_compte(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompteFull>, ApiError> {
    let compte = state.account_service.get_by_id(id).await?;
    Ok(Json(compte.into()))
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/api/v1/comptes/",
    request_body = CreateCompteRequest,
    responses(
        (status = 201, description = "Account created successfully", body = CompteFull),
        (status = 422, description = "Savings account with negative balance"),
        (status = 500, description = "Internal server error")
    ),
    tag = "compte"
)]
pub async fn create_compte(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCompteRequest>,
) -> Result<(StatusCode, Json<CompteFull>), ApiError> {
    let compte = state
        .account_service
        .create(NewAccount {
            account_type: request.account_type,
            balance: request.solde,
            currency: request.devise,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(compte.into())))
}

/// Update an existing account
#[utoipa::path(
    put,
    path = "/api/v1/comptes/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateCompteRequest,
    responses(
        (status = 200, description = "Account updated successfully", body = CompteFull),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Savings account with negative balance"),
        (status = 500, description = "Internal server error")
    ),
    tag = "compte"
)]
pub async fn update_compte(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCompteRequest>,
) -> Result<Json<CompteFull>, ApiError> {
    let compte = state
        .account_service
        .update(
            id,
            AccountPatch {
                account_type: request.account_type,
                balance: request.solde,
                currency: request.devise,
            },
        )
        .await?;

    Ok(Json(compte.into()))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/api/v1/comptes/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted successfully"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "compte"
)]
pub async fn delete_compte(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.account_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deposit money into an account
#[utoipa::path(
    post,
    path = "/api/v1/comptes/{id}/deposit",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Funds deposited successfully", body = CompteFull),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Amount is zero or negative"),
        (status = 500, description = "Internal server error")
    ),
    tag = "compte"
)]
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<CompteFull>, ApiError> {
    let compte = state.account_service.deposit(id, request.amount).await?;
    Ok(Json(compte.into()))
}

/// Withdraw money from an account
#[utoipa::path(
    post,
    path = "/api/v1/comptes/{id}/withdraw",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Funds withdrawn successfully", body = CompteFull),
        (status = 403, description = "Withdrawal exceeds current balance"),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Amount is zero or negative, or savings balance would go negative"),
        (status = 500, description = "Internal server error")
    ),
    tag = "compte"
)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<CompteFull>, ApiError> {
    let compte = state.account_service.withdraw(id, request.amount).await?;
    Ok(Json(compte.into()))
}
