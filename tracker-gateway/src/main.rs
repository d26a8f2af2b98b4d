//! Entry point for the `tracker-gateway` HTTP server.

use std::sync::Arc;

use tracing::info;
use tracker_gateway::{
    config::GatewayConfig, logging::init_tracing, routes::create_router, state::AppState,
};

#[tokio::main]
async fn main() {
    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_level);

    let addr = config.listen_addr();
    let app = create_router(Arc::new(AppState::new()), &config.assets);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    let port = listener.local_addr().map_or(addr.port(), |a| a.port());
    info!(addr = %addr, port, "tracker-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
