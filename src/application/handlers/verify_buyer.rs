//! VerifyBuyerHandler - Query handler for token-verified buyer lookups.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::application::{Lookup, MembershipStore};
use crate::config::VerificationConfig;
use crate::domain::membership::{token_matches, VerificationError};

/// Query to check whether an email belongs to an active buyer.
#[derive(Debug, Clone, Default)]
pub struct VerifyBuyerQuery {
    pub email: Option<String>,
    pub token: Option<String>,
}

/// Handler for buyer verification.
///
/// Read-only: never mutates the buyer list.
pub struct VerifyBuyerHandler {
    store: Arc<MembershipStore>,
    config: VerificationConfig,
}

impl VerifyBuyerHandler {
    pub fn new(store: Arc<MembershipStore>, config: VerificationConfig) -> Self {
        Self { store, config }
    }

    /// Returns whether the email is an active buyer.
    pub async fn handle(&self, query: VerifyBuyerQuery) -> Result<bool, VerificationError> {
        let email = query.email.filter(|e| !e.is_empty());
        let token = query.token.filter(|t| !t.is_empty());
        let (email, token) = match (email, token) {
            (Some(email), Some(token)) => (email, token),
            _ => return Err(VerificationError::MissingFields),
        };

        if !token_matches(&email, self.config.secret.expose_secret(), &token) {
            tracing::debug!("Rejected verification token");
            return Err(VerificationError::InvalidToken);
        }

        match self.store.lookup(&email).await {
            Lookup::Member => Ok(true),
            Lookup::NotMember => Ok(false),
            Lookup::Unavailable => Err(VerificationError::StoreUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::InMemoryListCache;
    use crate::adapters::remote_store::InMemoryListStore;
    use crate::domain::membership::{expected_token, MembershipList};

    const SECRET: &str = "test-secret";

    fn handler_with(entries: &[&str]) -> (VerifyBuyerHandler, InMemoryListStore) {
        let remote = InMemoryListStore::with_list(MembershipList::from_entries(entries.to_vec()));
        let store = MembershipStore::new(
            Arc::new(remote.clone()),
            Arc::new(InMemoryListCache::new()),
        );
        let handler =
            VerifyBuyerHandler::new(Arc::new(store), VerificationConfig::with_secret(SECRET));
        (handler, remote)
    }

    fn query(email: &str, token: &str) -> VerifyBuyerQuery {
        VerifyBuyerQuery {
            email: Some(email.to_string()),
            token: Some(token.to_string()),
        }
    }

    #[tokio::test]
    async fn member_with_valid_token_is_buyer() {
        let (handler, _remote) = handler_with(&["a@x.com"]);
        let token = expected_token("a@x.com", SECRET);

        assert_eq!(handler.handle(query("a@x.com", &token)).await, Ok(true));
    }

    #[tokio::test]
    async fn non_member_with_valid_token_is_not_buyer() {
        let (handler, _remote) = handler_with(&[]);
        let token = expected_token("a@x.com", SECRET);

        assert_eq!(handler.handle(query("a@x.com", &token)).await, Ok(false));
    }

    #[tokio::test]
    async fn wrong_token_is_rejected_even_for_members() {
        let (handler, _remote) = handler_with(&["a@x.com"]);

        assert_eq!(
            handler.handle(query("a@x.com", "deadbeef")).await,
            Err(VerificationError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn missing_email_is_rejected() {
        let (handler, _remote) = handler_with(&[]);
        let result = handler
            .handle(VerifyBuyerQuery {
                email: None,
                token: Some("x".to_string()),
            })
            .await;

        assert_eq!(result, Err(VerificationError::MissingFields));
    }

    #[tokio::test]
    async fn empty_token_is_rejected_as_missing() {
        let (handler, _remote) = handler_with(&[]);

        assert_eq!(
            handler.handle(query("a@x.com", "")).await,
            Err(VerificationError::MissingFields)
        );
    }

    #[tokio::test]
    async fn store_outage_is_not_reported_as_non_member() {
        let (handler, remote) = handler_with(&["a@x.com"]);
        remote.set_fail_reads(true);
        let token = expected_token("a@x.com", SECRET);

        assert_eq!(
            handler.handle(query("a@x.com", &token)).await,
            Err(VerificationError::StoreUnavailable)
        );
    }

    #[tokio::test]
    async fn verification_never_writes() {
        let (handler, remote) = handler_with(&["a@x.com"]);
        let token = expected_token("a@x.com", SECRET);

        handler.handle(query("a@x.com", &token)).await.unwrap();

        assert_eq!(remote.write_count(), 0);
    }
}
