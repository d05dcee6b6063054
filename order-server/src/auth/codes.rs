//! Verification code store
//!
//! Process-local, one live code per email. A code expires after the configured
//! TTL and is discarded after too many wrong guesses. A password reset needs a
//! code that was verified first, and consumes it.

use dashmap::DashMap;
use shared::error::{AppError, ErrorCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Wrong guesses tolerated before the code is discarded
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("no verification code was requested")]
    Missing,

    #[error("verification code has expired")]
    Expired,

    #[error("invalid verification code")]
    Invalid,

    #[error("too many attempts, request a new code")]
    TooManyAttempts,

    #[error("verification code has not been verified")]
    NotVerified,
}

impl From<CodeError> for AppError {
    fn from(err: CodeError) -> Self {
        let code = match err {
            CodeError::Missing => ErrorCode::VerificationCodeMissing,
            CodeError::Expired => ErrorCode::VerificationCodeExpired,
            CodeError::Invalid => ErrorCode::VerificationCodeInvalid,
            CodeError::TooManyAttempts => ErrorCode::TooManyAttempts,
            CodeError::NotVerified => ErrorCode::VerificationRequired,
        };
        AppError::with_message(code, err.to_string())
    }
}

#[derive(Debug, Clone)]
struct CodeEntry {
    code: String,
    issued_at: Instant,
    failed_attempts: u32,
    verified: bool,
}

#[derive(Clone)]
pub struct CodeStore {
    ttl: Duration,
    entries: Arc<DashMap<String, CodeEntry>>,
}

impl CodeStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Issue a fresh code for `email`, replacing any previous one
    pub fn issue(&self, email: &str) -> String {
        let code = shared::util::generate_code();
        self.insert(email, code.clone());
        code
    }

    pub(crate) fn insert(&self, email: &str, code: String) {
        self.entries.insert(
            email.to_string(),
            CodeEntry {
                code,
                issued_at: Instant::now(),
                failed_attempts: 0,
                verified: false,
            },
        );
    }

    /// Check `code` without consuming it.
    ///
    /// A wrong guess counts against the attempt limit; exceeding it or presenting
    /// an expired code discards the entry.
    pub fn check(&self, email: &str, code: &str) -> Result<(), CodeError> {
        let mut entry = self.entries.get_mut(email).ok_or(CodeError::Missing)?;

        if entry.issued_at.elapsed() >= self.ttl {
            drop(entry);
            self.entries.remove(email);
            return Err(CodeError::Expired);
        }

        if entry.code != code {
            entry.failed_attempts += 1;
            if entry.failed_attempts > MAX_FAILED_ATTEMPTS {
                drop(entry);
                self.entries.remove(email);
                return Err(CodeError::TooManyAttempts);
            }
            return Err(CodeError::Invalid);
        }

        Ok(())
    }

    /// Check `code` and remember that it was verified. The code stays usable.
    pub fn verify(&self, email: &str, code: &str) -> Result<(), CodeError> {
        self.check(email, code)?;
        if let Some(mut entry) = self.entries.get_mut(email) {
            entry.verified = true;
        }
        Ok(())
    }

    /// Check `code` and require an earlier successful [`verify`](Self::verify)
    pub fn check_verified(&self, email: &str, code: &str) -> Result<(), CodeError> {
        self.check(email, code)?;
        match self.entries.get(email) {
            Some(entry) if entry.verified => Ok(()),
            Some(_) => Err(CodeError::NotVerified),
            None => Err(CodeError::Missing),
        }
    }

    /// Remove the code for `email`
    pub fn consume(&self, email: &str) -> bool {
        self.entries.remove(email).is_some()
    }

    /// Drop expired codes, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, e| e.issued_at.elapsed() < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
