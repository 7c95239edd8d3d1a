//! Buyer HTTP adapter.
//!
//! Webhook intake, token-verified buyer lookup and the health check.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, VerifyRequest, VerifyResponse, WebhookAckResponse};
pub use handlers::{internal_error_response, timeout_response, MembershipAppState};
pub use routes::membership_router;
