//! Customer accounts and password recovery

use super::codes::CodeStore;
use super::mailer::CodeMailer;
use dine_store::repository::user;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, SendCodeRequest, UserProfile,
    VerifyCodeRequest,
};
use shared::password::{MIN_PASSWORD_LEN, hash_password, verify_password};
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct Accounts {
    pool: SqlitePool,
    codes: CodeStore,
    mailer: Arc<dyn CodeMailer>,
}

impl Accounts {
    pub fn new(pool: SqlitePool, codes: CodeStore, mailer: Arc<dyn CodeMailer>) -> Self {
        Self {
            pool,
            codes,
            mailer,
        }
    }

    pub fn codes(&self) -> &CodeStore {
        &self.codes
    }

    pub async fn register(&self, req: RegisterRequest) -> AppResult<UserProfile> {
        req.validate()?;
        check_password(&req.password)?;
        let email = shared::util::normalize_email(&req.email);

        if user::find_by_email(&self.pool, &email).await?.is_some() {
            return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
        }

        let hash = hash_password(&req.password).map_err(|e| {
            tracing::error!(error = %e, "Password hash error");
            AppError::internal("Failed to hash password")
        })?;

        let phone = req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty());
        let created = user::create(&self.pool, req.name.trim(), &email, phone, &hash)
            .await
            .map_err(|e| match e {
                dine_store::RepoError::Duplicate(_) => {
                    AppError::new(ErrorCode::EmailAlreadyRegistered)
                }
                other => other.into(),
            })?;

        tracing::info!(user_id = created.id, email = %email, "User registered");
        Ok(created.into())
    }

    pub async fn login(&self, req: LoginRequest) -> AppResult<UserProfile> {
        let email = shared::util::normalize_email(&req.email);
        let found = user::find_by_email(&self.pool, &email)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !verify_password(&req.password, &found.password_hash) {
            tracing::debug!(email = %email, "Login rejected");
            return Err(AppError::invalid_credentials());
        }

        tracing::info!(user_id = found.id, email = %email, "User logged in");
        Ok(found.into())
    }

    /// Issue a recovery code. Unknown emails get the same answer.
    pub async fn send_code(&self, req: SendCodeRequest) -> AppResult<()> {
        req.validate()?;
        let email = shared::util::normalize_email(&req.email);

        if user::find_by_email(&self.pool, &email).await?.is_none() {
            tracing::debug!(email = %email, "Recovery code requested for unknown email");
            return Ok(());
        }

        let code = self.codes.issue(&email);
        if let Err(e) = self.mailer.send_code(&email, &code).await {
            self.codes.consume(&email);
            tracing::error!(email = %email, error = %e, "Failed to send recovery code");
            return Err(AppError::internal("Failed to send verification code"));
        }
        Ok(())
    }

    pub async fn verify_code(&self, req: VerifyCodeRequest) -> AppResult<()> {
        req.validate()?;
        let email = shared::util::normalize_email(&req.email);
        self.codes.verify(&email, req.code.trim())?;
        tracing::info!(email = %email, "Recovery code verified");
        Ok(())
    }

    /// Set a new password with a verified code, consumed only after the hash is stored
    pub async fn reset_password(&self, req: ResetPasswordRequest) -> AppResult<()> {
        req.validate()?;
        check_password(&req.new_password)?;
        let email = shared::util::normalize_email(&req.email);

        self.codes.check_verified(&email, req.code.trim())?;

        let hash = hash_password(&req.new_password).map_err(|e| {
            tracing::error!(error = %e, "Password hash error");
            AppError::internal("Failed to hash password")
        })?;
        user::update_password(&self.pool, &email, &hash).await?;
        self.codes.consume(&email);

        tracing::info!(email = %email, "Password reset");
        Ok(())
    }
}

fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    Ok(())
}
