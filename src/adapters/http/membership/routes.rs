//! Axum router configuration for the buyer endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{handle_webhook, health, verify_buyer, MembershipAppState};

/// Create the buyer API router.
///
/// # Routes
///
/// ## Webhook Endpoints (no auth)
/// - `POST /webhook/:provider` - Apply a payment provider event to the buyer list
///
/// ## Lookup Endpoints (token verified)
/// - `POST /verify` - Report whether an email is an active buyer
///
/// ## Operational
/// - `GET /health` - Liveness check
pub fn membership_router() -> Router<MembershipAppState> {
    Router::new()
        .route("/webhook/:provider", post(handle_webhook))
        .route("/verify", post(verify_buyer))
        .route("/health", get(health))
}
