//! Error types for webhook handling and buyer verification.
//!
//! Each error maps to the HTTP status the caller should see. Store and cache
//! failures are absorbed by the membership store before they reach this layer.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that escape webhook handling.
///
/// Store failures never appear here: a webhook is acknowledged once its
/// action ran, whatever the action reported.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Payload could not be decoded into a webhook event.
    #[error("{0}")]
    Malformed(String),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors from the buyer verification endpoint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Email or token missing from the request.
    #[error("Email and token required")]
    MissingFields,

    /// Token does not match the expected digest.
    #[error("Invalid token")]
    InvalidToken,

    /// The membership list could not be read, so non-membership cannot be asserted.
    #[error("Membership store unavailable")]
    StoreUnavailable,
}

impl VerificationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VerificationError::MissingFields => StatusCode::BAD_REQUEST,
            VerificationError::InvalidToken => StatusCode::UNAUTHORIZED,
            VerificationError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Display Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn malformed_displays_inner_message() {
        let err = WebhookError::Malformed("expected value at line 1 column 1".to_string());
        assert_eq!(err.to_string(), "expected value at line 1 column 1");
    }

    #[test]
    fn missing_fields_displays_client_message() {
        assert_eq!(
            VerificationError::MissingFields.to_string(),
            "Email and token required"
        );
    }

    #[test]
    fn invalid_token_displays_client_message() {
        assert_eq!(VerificationError::InvalidToken.to_string(), "Invalid token");
    }

    // ══════════════════════════════════════════════════════════════
    // Status Code Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn malformed_webhook_returns_internal_error() {
        let err = WebhookError::Malformed("bad".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_fields_returns_bad_request() {
        assert_eq!(
            VerificationError::MissingFields.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn invalid_token_returns_unauthorized() {
        assert_eq!(
            VerificationError::InvalidToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn store_unavailable_returns_service_unavailable() {
        assert_eq!(
            VerificationError::StoreUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
