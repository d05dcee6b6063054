//! Unified error codes for the Dine services
//!
//! This module defines all error codes used across order-server, admin-server and
//! API clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Cart / order errors
//! - 5xxx: Inventory errors
//! - 6xxx: Menu / offer errors
//! - 7xxx: Table / event hall errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email is already registered
    EmailAlreadyRegistered = 1005,
    /// Password too short
    PasswordTooShort = 1006,
    /// Verification code expired
    VerificationCodeExpired = 1101,
    /// Verification code invalid
    VerificationCodeInvalid = 1102,
    /// No verification code was issued for this email
    VerificationCodeMissing = 1103,
    /// Too many verification attempts
    TooManyAttempts = 1104,
    /// Code must be verified before it can be used
    VerificationRequired = 1105,

    // ==================== 4xxx: Cart / Order ====================
    /// Cart line item not found
    CartItemNotFound = 4001,
    /// Cart is empty
    EmptyCart = 4002,

    // ==================== 5xxx: Inventory ====================
    /// Not enough stock / availability for the requested quantity
    InsufficientStock = 5001,
    /// Resource is already booked
    Unavailable = 5002,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Price could not be normalized to a positive amount
    InvalidPrice = 6002,
    /// Menu item name already exists
    MenuItemNameExists = 6003,
    /// Offer not found
    OfferNotFound = 6101,
    /// Menu item already has an offer
    OfferExists = 6102,

    // ==================== 7xxx: Venue ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table name already exists
    TableNameExists = 7002,
    /// Event hall not found
    EventHallNotFound = 7101,
    /// Event hall name already exists
    EventHallNameExists = 7102,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::VerificationCodeExpired => "Verification code has expired",
            ErrorCode::VerificationCodeInvalid => "Invalid verification code",
            ErrorCode::VerificationCodeMissing => "No verification code was requested",
            ErrorCode::TooManyAttempts => "Too many attempts",
            ErrorCode::VerificationRequired => "Verification code has not been verified",

            // Cart / Order
            ErrorCode::CartItemNotFound => "Cart item not found",
            ErrorCode::EmptyCart => "Cart is empty",

            // Inventory
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::Unavailable => "Resource is not available",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::InvalidPrice => "Invalid price",
            ErrorCode::MenuItemNameExists => "Menu item name already exists",
            ErrorCode::OfferNotFound => "Offer not found",
            ErrorCode::OfferExists => "Menu item already has an offer",

            // Venue
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNameExists => "Table name already exists",
            ErrorCode::EventHallNotFound => "Event hall not found",
            ErrorCode::EventHallNameExists => "Event hall name already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::EmailAlreadyRegistered),
            1006 => Ok(ErrorCode::PasswordTooShort),
            1101 => Ok(ErrorCode::VerificationCodeExpired),
            1102 => Ok(ErrorCode::VerificationCodeInvalid),
            1103 => Ok(ErrorCode::VerificationCodeMissing),
            1104 => Ok(ErrorCode::TooManyAttempts),
            1105 => Ok(ErrorCode::VerificationRequired),

            // Cart / Order
            4001 => Ok(ErrorCode::CartItemNotFound),
            4002 => Ok(ErrorCode::EmptyCart),

            // Inventory
            5001 => Ok(ErrorCode::InsufficientStock),
            5002 => Ok(ErrorCode::Unavailable),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::InvalidPrice),
            6003 => Ok(ErrorCode::MenuItemNameExists),
            6101 => Ok(ErrorCode::OfferNotFound),
            6102 => Ok(ErrorCode::OfferExists),

            // Venue
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableNameExists),
            7101 => Ok(ErrorCode::EventHallNotFound),
            7102 => Ok(ErrorCode::EventHallNameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
