//! HandleWebhookHandler - Command handler for payment provider webhooks.
//!
//! Decodes the payload, classifies the event and applies its membership
//! action. The delivery is acknowledged once the action ran; a failed store
//! write is logged, not reported back to the provider.

use std::sync::Arc;

use crate::application::MembershipStore;
use crate::domain::membership::{EventKind, MembershipAction, WebhookError, WebhookEvent};

/// Command to handle a webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleWebhookCommand {
    /// Provider name from the route (e.g., "cakto").
    pub provider: String,
    /// Raw JSON payload.
    pub payload: Vec<u8>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleWebhookResult {
    /// Grant event; `stored` is the store's success flag.
    Granted { email: Option<String>, stored: bool },
    /// Revoke event; `stored` is the store's success flag.
    Revoked { email: Option<String>, stored: bool },
    /// Event logged, list untouched.
    Observed { kind: EventKind },
}

/// Handler mapping webhook events onto buyer list mutations.
pub struct HandleWebhookHandler {
    store: Arc<MembershipStore>,
}

impl HandleWebhookHandler {
    pub fn new(store: Arc<MembershipStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: HandleWebhookCommand,
    ) -> Result<HandleWebhookResult, WebhookError> {
        let event = decode_event(&cmd.payload)?;

        let kind = event.kind();
        log_event(&cmd.provider, &kind, &event);

        let email = event.customer_email().map(str::to_string);
        let result = match kind.action() {
            MembershipAction::Grant => {
                let stored = self
                    .store
                    .add_email(email.as_deref().unwrap_or_default())
                    .await;
                HandleWebhookResult::Granted { email, stored }
            }
            MembershipAction::Revoke => {
                let stored = self
                    .store
                    .remove_email(email.as_deref().unwrap_or_default())
                    .await;
                HandleWebhookResult::Revoked { email, stored }
            }
            MembershipAction::Observe => HandleWebhookResult::Observed { kind },
        };

        if let HandleWebhookResult::Granted { stored: false, .. }
        | HandleWebhookResult::Revoked { stored: false, .. } = &result
        {
            tracing::warn!(
                provider = %cmd.provider,
                "Webhook acknowledged but buyer list was not updated"
            );
        }

        Ok(result)
    }
}

/// An empty body decodes as an event with no fields.
fn decode_event(payload: &[u8]) -> Result<WebhookEvent, WebhookError> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(WebhookEvent::default());
    }
    serde_json::from_slice(payload).map_err(|e| WebhookError::Malformed(e.to_string()))
}

fn log_event(provider: &str, kind: &EventKind, event: &WebhookEvent) {
    let order_id = event.order_id();
    let subscription_id = event.subscription_id();

    match kind {
        EventKind::PurchaseApproved => tracing::info!(
            provider,
            order_id = order_id.as_deref(),
            customer = event.customer_email(),
            product = event.product_name().as_deref(),
            amount = event.order_amount().as_deref(),
            "Purchase approved"
        ),
        EventKind::PurchaseRefused => {
            tracing::info!(provider, order_id = order_id.as_deref(), "Purchase refused")
        }
        EventKind::PaymentGenerated(method) => tracing::info!(
            provider,
            order_id = order_id.as_deref(),
            method = ?method,
            "Payment generated"
        ),
        EventKind::Chargeback => {
            tracing::warn!(provider, order_id = order_id.as_deref(), "Chargeback received")
        }
        EventKind::Refund => {
            tracing::info!(provider, order_id = order_id.as_deref(), "Refund issued")
        }
        EventKind::SubscriptionCreated
        | EventKind::SubscriptionCanceled
        | EventKind::SubscriptionRenewed
        | EventKind::SubscriptionRenewalRefused => tracing::info!(
            provider,
            event = kind.as_str(),
            subscription_id = subscription_id.as_deref(),
            customer = event.customer_email(),
            "Subscription event"
        ),
        EventKind::Unknown(name) => {
            tracing::info!(provider, event = %name, "Unhandled webhook event")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::InMemoryListCache;
    use crate::adapters::remote_store::InMemoryListStore;
    use crate::domain::membership::MembershipList;
    use serde_json::json;

    fn handler_with(entries: &[&str]) -> (HandleWebhookHandler, InMemoryListStore) {
        let remote = InMemoryListStore::with_list(MembershipList::from_entries(entries.to_vec()));
        let store = MembershipStore::new(
            Arc::new(remote.clone()),
            Arc::new(InMemoryListCache::new()),
        );
        (HandleWebhookHandler::new(Arc::new(store)), remote)
    }

    fn command(payload: serde_json::Value) -> HandleWebhookCommand {
        HandleWebhookCommand {
            provider: "cakto".to_string(),
            payload: serde_json::to_vec(&payload).unwrap(),
        }
    }

    #[tokio::test]
    async fn purchase_approved_adds_customer() {
        let (handler, remote) = handler_with(&[]);

        let result = handler
            .handle(command(json!({
                "event": "purchase_approved",
                "customer": { "email": "a@x.com" }
            })))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandleWebhookResult::Granted {
                email: Some("a@x.com".to_string()),
                stored: true
            }
        );
        assert_eq!(remote.snapshot().await.into_vec(), vec!["a@x.com"]);
    }

    #[tokio::test]
    async fn subscription_renewed_of_existing_buyer_does_not_write() {
        let (handler, remote) = handler_with(&["a@x.com"]);

        handler
            .handle(command(json!({
                "event": "subscription_renewed",
                "customer": { "email": "a@x.com" }
            })))
            .await
            .unwrap();

        assert_eq!(remote.write_count(), 0);
    }

    #[tokio::test]
    async fn subscription_canceled_removes_customer() {
        let (handler, remote) = handler_with(&["a@x.com", "b@y.com"]);

        let result = handler
            .handle(command(json!({
                "event": "subscription_canceled",
                "customer": { "email": "a@x.com" },
                "subscription": { "id": "sub_1" }
            })))
            .await
            .unwrap();

        assert!(matches!(result, HandleWebhookResult::Revoked { stored: true, .. }));
        assert_eq!(remote.snapshot().await.into_vec(), vec!["b@y.com"]);
    }

    #[tokio::test]
    async fn every_revoke_kind_removes_customer() {
        for name in [
            "subscription_canceled",
            "subscription_renewal_refused",
            "refund",
            "chargeback",
        ] {
            let (handler, remote) = handler_with(&["a@x.com"]);
            handler
                .handle(command(json!({
                    "event": name,
                    "customer": { "email": "a@x.com" }
                })))
                .await
                .unwrap();
            assert!(remote.snapshot().await.is_empty(), "{name}");
        }
    }

    #[tokio::test]
    async fn purchase_refused_is_observed_only() {
        let (handler, remote) = handler_with(&["a@x.com"]);

        let result = handler
            .handle(command(json!({
                "event": "purchase_refused",
                "customer": { "email": "b@y.com" }
            })))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandleWebhookResult::Observed {
                kind: EventKind::PurchaseRefused
            }
        );
        assert_eq!(remote.snapshot().await.into_vec(), vec!["a@x.com"]);
        assert_eq!(remote.write_count(), 0);
    }

    #[tokio::test]
    async fn unknown_event_is_observed_only() {
        let (handler, remote) = handler_with(&[]);

        let result = handler
            .handle(command(json!({ "event": "something_new" })))
            .await
            .unwrap();

        assert!(matches!(result, HandleWebhookResult::Observed { .. }));
        assert_eq!(remote.write_count(), 0);
    }

    #[tokio::test]
    async fn grant_without_customer_email_is_noop_success() {
        let (handler, remote) = handler_with(&[]);

        let result = handler
            .handle(command(json!({ "event": "purchase_approved" })))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandleWebhookResult::Granted {
                email: None,
                stored: true
            }
        );
        assert_eq!(remote.write_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_still_acknowledged() {
        let (handler, remote) = handler_with(&[]);
        remote.set_fail_writes(true);

        let result = handler
            .handle(command(json!({
                "event": "purchase_approved",
                "customer": { "email": "a@x.com" }
            })))
            .await;

        assert!(matches!(
            result,
            Ok(HandleWebhookResult::Granted { stored: false, .. })
        ));
    }

    #[tokio::test]
    async fn empty_payload_is_observed_only() {
        let (handler, remote) = handler_with(&["a@x.com"]);

        let result = handler
            .handle(HandleWebhookCommand {
                provider: "cakto".to_string(),
                payload: b"  \n".to_vec(),
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            HandleWebhookResult::Observed {
                kind: EventKind::Unknown(String::new())
            }
        );
        assert_eq!(remote.write_count(), 0);
    }

    #[tokio::test]
    async fn malformed_payload_is_error() {
        let (handler, _remote) = handler_with(&[]);

        let result = handler
            .handle(HandleWebhookCommand {
                provider: "cakto".to_string(),
                payload: b"{not json".to_vec(),
            })
            .await;

        assert!(matches!(result, Err(WebhookError::Malformed(_))));
    }
}
