//! Delivery of verification codes

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to deliver verification code: {0}")]
pub struct MailError(pub String);

/// Sends a password recovery code to a customer
#[async_trait]
pub trait CodeMailer: Send + Sync {
    async fn send_code(&self, to: &str, code: &str) -> Result<(), MailError>;
}

/// Writes the code to the log instead of sending mail
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl CodeMailer for LogMailer {
    async fn send_code(&self, to: &str, code: &str) -> Result<(), MailError> {
        tracing::info!(to = to, "Verification code sent");
        tracing::debug!(to = to, code = code, "Verification code");
        Ok(())
    }
}
