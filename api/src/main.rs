use anyhow::Context;
use clap::Parser;
use crop_balance_api::{app, logger, AppState, CliArgs, ServerConfig, ServerError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = ServerConfig::load(&args)?;

    logger::init_logger(config.verbose, config.json_logs);
    tracing::debug!(?config, "resolved configuration");

    let app = app::create_router(AppState::default());
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(ServerError::from)
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("🚀 Starting server on {}", addr);
    tracing::info!("📱 Android emulator can access via: http://10.0.2.2:{}", config.port);
    tracing::info!("🌐 Local access via: http://127.0.0.1:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::from)?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}
