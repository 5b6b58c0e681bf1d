//! Application startup and server initialization.
//!
//! Picks the metric backend, wires the message handlers to their log
//! channels and serves the router on the configured address.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::handlers::Dispatcher;
use crate::routes;
use crate::state::AppState;
use crate::statsd::create_statist;
use crate::utils::log_sink::TracingSink;
use crate::utils::log_throttle::LogThrottle;

/// Builds the shared state: the metric backend selected from `config.statsd`
/// and the `log`/`metric` handlers writing to the `messages` channel.
pub fn build_state(config: Arc<ConfigV1>) -> std::io::Result<AppState> {
    let statist = create_statist(&config.statsd)?;
    let dispatcher = Dispatcher::with_defaults(
        statist,
        Arc::new(TracingSink::messages()),
        &config.metrics,
    );

    Ok(AppState {
        config,
        dispatcher: Arc::new(dispatcher),
        error_log_throttle: Arc::new(LogThrottle::default()),
    })
}

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the metric backend cannot be created, the server
/// fails to bind to the configured address, or serving fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config.clone())?;
    let app = routes::create_router(state);

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
