//! HTTP handlers for the buyer endpoints.
//!
//! These handlers connect Axum routes to the application layer handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    HandleWebhookCommand, HandleWebhookHandler, MembershipStore, VerifyBuyerHandler,
    VerifyBuyerQuery,
};
use crate::config::VerificationConfig;
use crate::domain::membership::{VerificationError, WebhookError};

use super::dto::{ErrorResponse, HealthResponse, VerifyRequest, VerifyResponse, WebhookAckResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state.
///
/// Cloned for each request; the store is shared behind an Arc so its writer
/// lock covers every request.
#[derive(Clone)]
pub struct MembershipAppState {
    pub store: Arc<MembershipStore>,
    pub verification: VerificationConfig,
}

impl MembershipAppState {
    pub fn new(store: Arc<MembershipStore>, verification: VerificationConfig) -> Self {
        Self {
            store,
            verification,
        }
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        HandleWebhookHandler::new(self.store.clone())
    }

    pub fn verify_handler(&self) -> VerifyBuyerHandler {
        VerifyBuyerHandler::new(self.store.clone(), self.verification.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhook/:provider - Handle payment provider webhook events
pub async fn handle_webhook(
    State(state): State<MembershipAppState>,
    Path(provider): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let cmd = HandleWebhookCommand {
        provider,
        payload: body.to_vec(),
    };

    state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookAckResponse::ok()))
}

/// POST /verify - Check whether an email belongs to an active buyer
pub async fn verify_buyer(
    State(state): State<MembershipAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, VerificationApiError> {
    // An unreadable body carries no fields.
    let request: VerifyRequest = serde_json::from_slice(&body).unwrap_or_default();

    let query = VerifyBuyerQuery {
        email: request.email,
        token: request.token,
    };
    let buyer = state.verify_handler().handle(query).await?;

    Ok(Json(VerifyResponse { buyer }))
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error for webhook deliveries.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Webhook handling failed: {}", self.0);
        let body = ErrorResponse::new(self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}

/// API error for buyer verification.
pub struct VerificationApiError(VerificationError);

impl From<VerificationError> for VerificationApiError {
    fn from(err: VerificationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for VerificationApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse::new(self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}

/// Response for requests whose handler panicked.
pub fn internal_error_response() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal error")),
    )
        .into_response()
}

/// Response sent when a request exceeds the configured timeout.
pub fn timeout_response() -> axum::response::Response {
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ErrorResponse::new("Request timed out")),
    )
        .into_response()
}
