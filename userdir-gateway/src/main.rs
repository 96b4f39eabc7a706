//! Entry point for the `userdir-gateway` HTTP server.

use std::sync::Arc;

use tracing::info;
use userdir_core::UserStore;
use userdir_gateway::{
    config::GatewayConfig,
    routes::{create_router, AppState, SWAGGER_PATH},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = Arc::new(UserStore::seeded(config.id_assignment));
    info!(
        users = store.len(),
        id_assignment = ?store.assignment(),
        path_ids = ?config.path_ids,
        "user store seeded"
    );
    let app = create_router(AppState::new(store, config.path_ids));

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, docs = SWAGGER_PATH, "userdir-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
