//! AccountHub Server: user registration, login and cookie sessions.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use accounthub_api::{AppState, build_app};
use accounthub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use accounthub_core::config::{AppConfig, DatabaseProvider};
use accounthub_core::error::AppError;
use accounthub_database::{DatabasePool, MemoryUserRepository, PgUserRepository, UserStore};
use accounthub_service::AccountService;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env file: {e}");
        }
    }

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ACCOUNTHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AccountHub v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.uses_placeholder_secrets() {
        tracing::warn!("Token secrets are still the shipped placeholders; set ACCOUNTHUB__AUTH__*");
    }

    // ── Step 1: User store ───────────────────────────────────────
    let (users, db_pool): (Arc<dyn UserStore>, Option<DatabasePool>) =
        match config.database.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(&config.database).await?;
                accounthub_database::migration::prepare_schema(
                    pool.pool(),
                    config.database.run_migrations,
                )
                .await?;

                let repo = PgUserRepository::new(pool.pool().clone());
                (Arc::new(repo), Some(pool))
            }
            DatabaseProvider::Memory => {
                tracing::warn!("Using in-memory user store; accounts are lost on restart");
                (Arc::new(MemoryUserRepository::new()), None)
            }
        };

    // ── Step 2: Media uploader ───────────────────────────────────
    let uploader = accounthub_storage::build_uploader(&config.storage).await?;

    // ── Step 3: Auth and services ────────────────────────────────
    let account_service = Arc::new(AccountService::new(
        users,
        uploader,
        Arc::new(PasswordHasher::new()),
        Arc::new(JwtEncoder::new(&config.auth)),
        Arc::new(JwtDecoder::new(&config.auth)),
    ));

    // ── Step 4: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(Arc::new(config), account_service);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "AccountHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("AccountHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
