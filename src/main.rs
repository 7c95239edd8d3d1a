//! Buyer Registry server binary.

use std::sync::Arc;

use buyer_registry::adapters::http::{app, MembershipAppState};
use buyer_registry::adapters::{FileListCache, HttpListStore, HttpListStoreConfig};
use buyer_registry::application::{MembershipStore, StartupReport};
use buyer_registry::config::AppConfig;
use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(environment = ?config.server.environment, "Starting buyer registry");
    if config.verification.uses_default_secret() {
        tracing::warn!("Verification secret is the insecure default; set BUYER_REGISTRY__VERIFICATION__SECRET");
    }
    if !config.store.has_api_key() {
        tracing::warn!("Remote store API key not set; buyer list writes will be rejected");
    }

    let remote = HttpListStore::new(
        HttpListStoreConfig::new(&config.store.url, config.store.api_key.expose_secret().as_str())
            .with_api_key_param(&config.store.api_key_param)
            .with_timeout(config.store.timeout()),
    )?;
    let cache = FileListCache::new(&config.cache.path);
    let store = Arc::new(MembershipStore::new(Arc::new(remote), Arc::new(cache)));

    match store.startup_check().await {
        StartupReport::Remote { buyers } => {
            tracing::info!(buyers, "Remote buyer list reachable")
        }
        StartupReport::MirrorOnly { buyers } => tracing::warn!(
            buyers,
            mirror = %config.cache.path.display(),
            "Remote buyer list unreachable; local mirror available for manual restore"
        ),
        StartupReport::Unavailable => {
            tracing::warn!("Remote buyer list unreachable and no local mirror found")
        }
    }

    let state = MembershipAppState::new(store, config.verification.clone());
    let router = app(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Webhook: POST /webhook/<provider>");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true),
            )
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
