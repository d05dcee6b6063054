//! Admin server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Admin server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file shared with order-server
    pub database_path: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// JWT secret for admin tokens
    pub jwt_secret: String,
    /// Initial admin, created when no admin exists yet
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Outside development a missing secret is a startup error
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let request_timeout_ms: u64 = match std::env::var("REQUEST_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| format!("REQUEST_TIMEOUT_MS has an invalid value: {raw}"))?,
            Err(_) => 30_000,
        };
        let http_port: u16 = match std::env::var("HTTP_PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| format!("HTTP_PORT has an invalid value: {raw}"))?,
            Err(_) => 3001,
        };

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "dine.db".into()),
            http_port,
            request_timeout: Duration::from_millis(request_timeout_ms),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            admin_email: std::env::var("ADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Configuration for tests and embedded use
    pub fn for_database(database_path: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            http_port: 0,
            environment: "development".into(),
            request_timeout: Duration::from_secs(30),
            jwt_secret: jwt_secret.into(),
            admin_email: None,
            admin_password: None,
        }
    }
}
