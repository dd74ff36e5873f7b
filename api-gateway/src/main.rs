//! API Gateway for the bank account service

use std::sync::Arc;

use axum::Router;
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use account_service::{AccountService, AccountServiceConfig};
use api_gateway::config::AppConfig;
use api_gateway::{api, app, AppState};

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::compte::list_comptes,
        api::compte::search_comptes,
        api::compte::get_compte,
        api::compte::create_compte,
        api::compte::update_compte,
        api::compte::delete_compte,
        api::compte::deposit,
        api::compte::withdraw,
    ),
    components(
        schemas(
            api::compte::CreateCompteRequest,
            api::compte::UpdateCompteRequest,
            api::compte::TransactionRequest,
            api::projection::Projection,
            api::projection::CompteFull,
            api::projection::CompteSummary,
            api::projection::CompteMinimal,
            common::model::account::AccountType,
        )
    ),
    tags(
        (name = "compte", description = "Bank account management endpoints")
    ),
    info(
        title = "Bank Account API",
        version = "1.0.0",
        description = "API for managing bank accounts: CRUD, search, deposits, and withdrawals"
    )
)]
struct ApiDoc;

/// Bank account API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address; defaults to 127.0.0.1 on the configured port
    #[clap(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,account_service=debug")
        .unwrap();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    debug!("Debug logging enabled");

    // Initialize the account service: PostgreSQL when configured, otherwise
    // the in-memory repository
    let config = AppConfig::new();
    let account_service = match &config.database_url {
        Some(_) => {
            info!("Using PostgreSQL repository");
            AccountService::with_config(&AccountServiceConfig::from_env())
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?
        }
        None => {
            info!("DATABASE_URL not set, using in-memory repository");
            AccountService::new()
        }
    };

    // Create app state
    let state = Arc::new(AppState {
        account_service: Arc::new(account_service),
    });

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Set up Swagger UI
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    // Combine all routes
    let router = Router::new()
        .merge(app(state))
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        );

    // Start the server
    let addr = args
        .addr
        .unwrap_or_else(|| format!("127.0.0.1:{}", config.port));
    let addr: std::net::SocketAddr = addr.parse().expect("Invalid address");
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
