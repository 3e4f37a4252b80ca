//! Callscribe API server entry point.

use std::sync::Arc;

use callscribe_api::config::AppConfig;
use callscribe_api::error::AppError;
use callscribe_api::state::AppState;
use callscribe_core::clock::SystemClock;
use callscribe_store::schema::MIGRATOR;
use callscribe_store::sqlite_call_repository::SqliteCallRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Callscribe API server");

    let config = AppConfig::from_env()?;

    // Create the single shared connection pool and bring the schema up to date.
    let pool = callscribe_store::connect(&config.store).await?;
    MIGRATOR.run(&pool).await?;

    let repository = Arc::new(SqliteCallRepository::new(pool));
    let app_state = AppState::new(Arc::new(SystemClock), repository.clone());
    let app = callscribe_api::build_router(app_state);

    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down, closing database pool");
    repository.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
