use std::sync::Arc;

use shoplink::{
    common::{AnyResult, logger},
    configs::Config,
    server::AppState,
    store::spawn_sweeper,
    transport,
};
use tracing::info;

#[tokio::main]
async fn main() -> AnyResult<()> {
    let (config, config_path) = Config::load()?;
    logger::init(config.logging.as_ref());
    info!("Loaded configuration from {}", config_path);

    let address = (config.server.host.clone(), config.server.port);
    let sweep_every = config.offer.sweep_interval();

    let state = Arc::new(AppState::from_config(config)?);
    info!(
        "Tokens live {}s, swept every {}s; {} artists mapped",
        state.offers.ttl_secs(),
        sweep_every.as_secs(),
        state.config.artists.len()
    );

    let sweeper = spawn_sweeper(state.offers.tokens().clone(), sweep_every);
    let app = transport::http_server::router(state);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Shoplink listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Shoplink stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
