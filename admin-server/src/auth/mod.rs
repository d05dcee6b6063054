//! Admin authentication: password login, JWT issuance and the Bearer middleware

pub mod jwt;

pub use jwt::{AdminIdentity, admin_auth_middleware, create_token, verify_token};

use dine_store::repository::admin;
use shared::error::{AppError, AppResult};
use shared::models::{AdminLoginRequest, AdminLoginResponse};
use shared::password::{hash_password, verify_password};
use sqlx::SqlitePool;
use validator::Validate;

use crate::config::Config;

/// Check credentials and issue a token
pub async fn login(
    pool: &SqlitePool,
    secret: &str,
    req: AdminLoginRequest,
) -> AppResult<AdminLoginResponse> {
    req.validate()?;
    let email = shared::util::normalize_email(&req.email);

    let found = admin::find_by_email(pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;
    if !verify_password(&req.password, &found.password_hash) {
        tracing::debug!(email = %email, "Admin login rejected");
        return Err(AppError::invalid_credentials());
    }

    let token = create_token(found.id, &found.email, secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::internal("Failed to create token")
    })?;

    tracing::info!(admin_id = found.id, email = %email, "Admin logged in");
    Ok(AdminLoginResponse {
        token,
        email: found.email,
    })
}

/// Create the initial admin from configuration when the admin table is empty.
/// Returns true when an admin was created.
pub async fn seed_admin(pool: &SqlitePool, config: &Config) -> AppResult<bool> {
    if admin::count(pool).await? > 0 {
        return Ok(false);
    }

    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        tracing::warn!("No admin account exists; set ADMIN_EMAIL and ADMIN_PASSWORD to create one");
        return Ok(false);
    };

    let email = shared::util::normalize_email(email);
    if password.chars().count() < shared::password::MIN_PASSWORD_LEN {
        return Err(AppError::validation(
            "ADMIN_PASSWORD must be at least 8 characters",
        ));
    }
    let hash = hash_password(password).map_err(|e| {
        tracing::error!(error = %e, "Password hash error");
        AppError::internal("Failed to hash password")
    })?;
    admin::create(pool, &email, &hash).await?;

    tracing::info!(email = %email, "Initial admin created");
    Ok(true)
}
