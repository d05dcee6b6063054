//! admin-server binary

use admin_server::{AppState, Config, auth, build_app};
use dine_store::DbService;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_server=info,dine_store=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting admin-server (env: {})", config.environment);

    let db = DbService::new(&config.database_path).await?;
    auth::seed_admin(db.pool(), &config).await?;

    let http_port = config.http_port;
    let app = build_app(AppState::new(db.pool().clone(), config));

    let http_addr = format!("0.0.0.0:{http_port}");
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("admin-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
