//! HTTP adapters - REST API implementations.

pub mod membership;

use std::any::Any;
use std::time::Duration;

use axum::http::StatusCode;
use axum::middleware;
use axum::response::Response;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use membership::{membership_router, MembershipAppState};

/// Build the full application router with tracing, timeout and panic layers.
pub fn app(state: MembershipAppState, request_timeout: Duration) -> Router {
    membership_router()
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_as_json))
        .layer(TraceLayer::new_for_http())
}

/// `TimeoutLayer` answers with an empty 408; give it the usual error body.
async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out");
        return membership::timeout_response();
    }
    response
}

fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    membership::internal_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::cache::InMemoryListCache;
    use crate::adapters::remote_store::InMemoryListStore;
    use crate::application::MembershipStore;
    use crate::config::VerificationConfig;
    use crate::domain::membership::{expected_token, MembershipList};

    #[tokio::test]
    async fn layered_app_serves_health() {
        let store = MembershipStore::new(
            Arc::new(InMemoryListStore::new()),
            Arc::new(InMemoryListCache::new()),
        );
        let state = MembershipAppState::new(Arc::new(store), VerificationConfig::default());
        let app = app(state, Duration::from_secs(5));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let store = MembershipStore::new(
            Arc::new(InMemoryListStore::new()),
            Arc::new(InMemoryListCache::new()),
        );
        let state = MembershipAppState::new(Arc::new(store), VerificationConfig::default());
        let app = app(state, Duration::from_secs(5));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/webhooks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn slow_request_times_out_with_json_error() {
        let remote = InMemoryListStore::with_list(MembershipList::from_entries(["a@x.com"]))
            .with_latency(Duration::from_millis(500));
        let store = MembershipStore::new(Arc::new(remote), Arc::new(InMemoryListCache::new()));
        let state =
            MembershipAppState::new(Arc::new(store), VerificationConfig::with_secret("s"));
        let app = app(state, Duration::from_millis(50));
        let body = json!({ "email": "a@x.com", "token": expected_token("a@x.com", "s") });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/verify")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Request timed out" }));
    }
}
