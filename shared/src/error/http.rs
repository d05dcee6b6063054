//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::CartItemNotFound
            | Self::MenuItemNotFound
            | Self::OfferNotFound
            | Self::TableNotFound
            | Self::EventHallNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (reservation denied, uniqueness)
            Self::AlreadyExists
            | Self::InsufficientStock
            | Self::Unavailable
            | Self::EmailAlreadyRegistered
            | Self::MenuItemNameExists
            | Self::OfferExists
            | Self::TableNameExists
            | Self::EventHallNameExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 422 Unprocessable (price data cannot be used)
            Self::InvalidPrice => StatusCode::UNPROCESSABLE_ENTITY,

            // 429 Too Many Requests
            Self::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
