//! GraphQL schema for the account service
//!
//! Mirrors the REST surface: two queries and five mutations, all delegating
//! to the account service. Service errors surface as GraphQL errors carrying
//! a `code` extension.

pub mod types;

use std::sync::Arc;

use account_service::AccountService;
use async_graphql::http::GraphiQLSource;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};
use axum::response::{Html, IntoResponse};
use common::decimal::Amount;
use common::model::account::{AccountPatch, AccountType, NewAccount};
use uuid::Uuid;

use crate::graphql::types::{Compte, CompteCreateInput, CompteUpdateInput};

/// Schema type for the account service
pub type ComptesSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with the account service injected
pub fn build_schema(account_service: Arc<AccountService>) -> ComptesSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(account_service)
        .finish()
}

/// GraphiQL playground handler
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Translate a service error into a GraphQL error with a `code` extension
fn to_graphql_error(err: common::error::Error) -> async_graphql::Error {
    use common::error::Error;

    let code = match &err {
        Error::AccountNotFound(_) => "account_not_found",
        Error::InvalidAmount(_) => "invalid_amount",
        Error::InsufficientFunds(_) => "insufficient_funds",
        Error::NegativeBalance(_) => "negative_balance",
        Error::ValidationError(_) => "validation_error",
        _ => "internal_error",
    };

    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}

fn account_service<'a>(ctx: &Context<'a>) -> &'a Arc<AccountService> {
    ctx.data_unchecked::<Arc<AccountService>>()
}

/// Query root
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch accounts with optional filtering
    ///
    /// Type takes priority over the balance range; with no criteria at all,
    /// every account is returned.
    async fn get_all_comptes(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "type")] account_type: Option<AccountType>,
        min_solde: Option<Amount>,
        max_solde: Option<Amount>,
    ) -> async_graphql::Result<Vec<Compte>> {
        let service = account_service(ctx);

        let comptes = if let Some(account_type) = account_type {
            service
                .find_by_type(account_type)
                .await
                .map_err(to_graphql_error)?
        } else if min_solde.is_some() || max_solde.is_some() {
            service
                .find_by_balance_range(min_solde, max_solde)
                .await
                .map_err(to_graphql_error)?
        } else {
            service.get_all().await.map_err(to_graphql_error)?
        };

        Ok(comptes.into_iter().map(Compte::from).collect())
    }

    /// Fetch a specific account by ID, or null when it does not exist
    async fn get_compte(&self, ctx: &Context<'_>, id: Uuid) -> Option<Compte> {
        let service = account_service(ctx);
        service.get_by_id(id).await.ok().map(Compte::from)
    }
}

/// Mutation root
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new account
    async fn create_compte(
        &self,
        ctx: &Context<'_>,
        input: CompteCreateInput,
    ) -> async_graphql::Result<Compte> {
        let service = account_service(ctx);

        let compte = service
            .create(NewAccount {
                account_type: input.account_type,
                balance: input.solde,
                currency: input.devise,
            })
            .await
            .map_err(to_graphql_error)?;

        Ok(compte.into())
    }

    /// Update an existing account
    async fn update_compte(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        input: CompteUpdateInput,
    ) -> async_graphql::Result<Compte> {
        let service = account_service(ctx);

        let compte = service
            .update(
                id,
                AccountPatch {
                    account_type: input.account_type,
                    balance: input.solde,
                    currency: input.devise,
                },
            )
            .await
            .map_err(to_graphql_error)?;

        Ok(compte.into())
    }

    /// Delete an account
    async fn delete_compte(&self, ctx: &Context<'_>, id: Uuid) -> async_graphql::Result<String> {
        let service = account_service(ctx);

        service.delete(id).await.map_err(to_graphql_error)?;
        Ok(format!("Compte {} deleted successfully", id))
    }

    /// Add money to an account
    async fn deposit(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        amount: Amount,
    ) -> async_graphql::Result<Compte> {
        let service = account_service(ctx);

        let compte = service
            .deposit(id, amount)
            .await
            .map_err(to_graphql_error)?;
        Ok(compte.into())
    }

    /// Remove money from an account, subject to the balance rules
    async fn withdraw(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        amount: Amount,
    ) -> async_graphql::Result<Compte> {
        let service = account_service(ctx);

        let compte = service
            .withdraw(id, amount)
            .await
            .map_err(to_graphql_error)?;
        Ok(compte.into())
    }
}
