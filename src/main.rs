mod error;
mod handlers;
mod models;

use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use handlers::{oauth::GitHubExchange, router};
    use models::{AppConfig, AppState};
    use std::{net::SocketAddr, sync::Arc};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_config = AppConfig::from_env()
        .inspect_err(|e| error!(error = %e, "Refusing to start without valid configuration"))?;

    info!(
        origins = %app_config.allowed_origins,
        token_url = %app_config.token_url,
        timeout_secs = app_config.upstream_timeout.as_secs(),
        "Loaded relay configuration"
    );

    let exchange = GitHubExchange::from_config(&app_config)?;

    let app_state = AppState {
        exchange: Arc::new(exchange),
        origins: Arc::new(app_config.allowed_origins.clone()),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Token relay listening");

    axum::serve(listener, router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Token relay stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
