//! Order server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Order server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file shared with admin-server
    pub database_path: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Lifetime of a password recovery code
    pub verification_code_ttl: Duration,
    /// Directory for daily rolling log files (stdout only when unset)
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Ok(Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "dine.db".into()),
            http_port: parse_var("HTTP_PORT", 3000)?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout: Duration::from_millis(parse_var("REQUEST_TIMEOUT_MS", 30_000)?),
            verification_code_ttl: Duration::from_secs(parse_var(
                "VERIFICATION_CODE_TTL_SECS",
                600,
            )?),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Configuration for tests and embedded use
    pub fn for_database(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            http_port: 0,
            environment: "development".into(),
            request_timeout: Duration::from_secs(30),
            verification_code_ttl: Duration::from_secs(600),
            log_dir: None,
        }
    }
}

/// Parse an optional env var. An unparsable value is an error.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, BoxError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| format!("{name} has an invalid value: {raw}").into()),
        _ => Ok(default),
    }
}
