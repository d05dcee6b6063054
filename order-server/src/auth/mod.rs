//! Customer accounts: registration, login and code-based password recovery

pub mod accounts;
pub mod codes;
pub mod mailer;

pub use accounts::Accounts;
pub use codes::{CodeError, CodeStore};
pub use mailer::{CodeMailer, LogMailer, MailError};
