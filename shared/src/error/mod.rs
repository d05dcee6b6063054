//! Error codes, categories and the `AppError` type shared by both services
//!
//! Code ranges:
//! - 0xxx: general
//! - 1xxx: authentication and recovery codes
//! - 4xxx: cart and orders
//! - 5xxx: inventory reservations
//! - 6xxx: menu and offers
//! - 7xxx: tables and event halls
//! - 9xxx: system
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::InsufficientStock).with_detail("available", 2);
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 5001);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
