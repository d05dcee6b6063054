//! order-server binary

use dine_store::DbService;
use order_server::{AppState, Config, build_app, utils::init_logger};
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Interval of the recovery code and cart lock sweep
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger(
        "order_server=info,dine_store=info,tower_http=info",
        config.log_dir.as_deref(),
        "order-server.log",
    );

    tracing::info!(
        "Starting order-server (env: {}, db: {})",
        config.environment,
        config.database_path
    );

    let db = DbService::new(&config.database_path).await?;
    let http_port = config.http_port;
    let state = AppState::new(db.pool().clone(), config);

    // Periodic sweep of expired codes and idle cart locks
    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sweeper.sweep();
        }
    });

    let app = build_app(state);
    let http_addr = format!("0.0.0.0:{http_port}");
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("order-server HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("order-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
