// api-gateway/src/lib.rs
pub mod api;
pub mod config;
pub mod error;
pub mod graphql;

use std::sync::Arc;

use account_service::AccountService;
use axum::routing::{get, post};
use axum::Router;

use crate::api::compte::{
    create_compte, delete_compte, deposit, get_compte, list_comptes, search_comptes,
    update_compte, withdraw,
};

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
}

/// Build the application router: REST surface plus GraphQL endpoint
pub fn app(state: Arc<AppState>) -> Router {
    let schema = graphql::build_schema(state.account_service.clone());

    let compte_routes = Router::new()
        .route("/", get(list_comptes).post(create_compte))
        .route("/search", get(search_comptes))
        .route(
            "/:id",
            get(get_compte).put(update_compte).delete(delete_compte),
        )
        .route("/:id/deposit", post(deposit))
        .route("/:id/withdraw", post(withdraw));

    Router::new()
        .nest("/api/v1/comptes", compte_routes)
        // axum 0.7's `nest` does not route the bare trailing-slash URI
        // (`/api/v1/comptes/`) to the nested `/` route, so register the
        // documented path explicitly as well.
        .route(
            "/api/v1/comptes/",
            get(list_comptes).post(create_compte),
        )
        .route(
            "/graphql",
            get(graphql::graphiql).post_service(async_graphql_axum::GraphQL::new(schema)),
        )
        .with_state(state)
}
