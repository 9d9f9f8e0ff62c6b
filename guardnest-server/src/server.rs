use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Time in-flight requests get to finish once shutdown starts.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Serves `app` on `addr` until SIGINT or SIGTERM, then drains connections.
pub(crate) async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let handle = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
}

async fn shutdown_on_signal(handle: Handle) {
    shutdown_signal().await;
    tracing::info!(
        "Shutdown signal received, waiting up to {}s for in-flight requests",
        SHUTDOWN_GRACE.as_secs()
    );
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogStyle {
    Plain,
    Json,
}

impl LogStyle {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogStyle::Json,
            _ => LogStyle::Plain,
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
fn default_filter(app_name: &str, log_level: Option<&str>) -> String {
    match log_level.map(str::trim).filter(|v| !v.is_empty()) {
        Some(level) => level.to_string(),
        None => {
            #[cfg(debug_assertions)]
            {
                format!("guardnest_axum=debug,guardnest=debug,{app_name}=debug,info")
            }

            #[cfg(not(debug_assertions))]
            {
                let _ = app_name;
                "info".to_string()
            }
        }
    }
}

pub(crate) fn init_tracing(app_name: &str) {
    let log_level = std::env::var("LOG_LEVEL").ok();
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(app_name, log_level.as_deref()).into());

    let style = LogStyle::from_env_value(std::env::var("LOG_STYLE").ok().as_deref());
    let registry = tracing_subscriber::registry().with(env_filter);
    match style {
        LogStyle::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogStyle::Plain => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Log output: {:?}", style);
    tracing::info!("You can increase verbosity by setting the RUST_LOG environment variable.");
}
