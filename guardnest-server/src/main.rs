use std::sync::Arc;

use guardnest::{
    AuthGate, DATABASE_MAX_CONNECTIONS, HttpRefreshAuthority, REFRESH_TIMEOUT,
    SESSION_REFRESH_WINDOW, SessionService, connect_session_store,
};
use guardnest_axum::api_router;

mod config;
mod server;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_file = guardnest::load_env_files();
    server::init_tracing(env!("CARGO_CRATE_NAME"));
    match env_file {
        Some(path) => tracing::info!("Loaded environment from {}", path.display()),
        None => tracing::debug!("No .env.local or .env file found, using process environment"),
    }

    let config = ServerConfig::from_env()?;
    tracing::info!(
        "Configuration loaded: store {:?}, refresh authority {}",
        config.store_kind,
        config.refresh_url
    );

    let store = connect_session_store(
        config.store_kind,
        &config.database_url,
        *DATABASE_MAX_CONNECTIONS,
    )?;
    let refresher = Arc::new(HttpRefreshAuthority::new(
        &config.refresh_url,
        *REFRESH_TIMEOUT,
    )?);
    let service =
        SessionService::new(store, refresher).with_refresh_window(*SESSION_REFRESH_WINDOW);
    let gate = AuthGate::from_env(service);

    server::serve(config.addr, api_router(gate)).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
