use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use rota_engine::shared::infrastructure::database::Database;
use rota_engine::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use rota_engine::shared::infrastructure::notification_sink::in_memory::InMemoryNotificationSink;
use rota_engine::shared::infrastructure::ports::Ports;
use rota_engine::shell::config::AppConfig;
use rota_engine::shell::http::router;
use rota_engine::shell::state::AppState;
use rota_engine::shell::workers::NotificationRelay;

const NOTIFICATION_TOPIC: &str = "notifications";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env()?;
    let database = Arc::new(Database::seeded(config.pool(), config.initial_tables()?));
    let outbox = Arc::new(InMemoryDomainOutbox::new());
    let sink = Arc::new(InMemoryNotificationSink::new());

    let relay = NotificationRelay::new(outbox.clone(), sink, config.relay_batch_size);
    tokio::spawn(relay.run(config.relay_interval()));

    let ports = Ports::new(NOTIFICATION_TOPIC, database, outbox);
    let state = AppState::new(ports, config.feed());
    let app = router(state).layer(CorsLayer::permissive());

    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "rota engine listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
