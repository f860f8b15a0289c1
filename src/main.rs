use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tarkib::logging::{init_tracing, shutdown_tracer};
use tarkib::metrics::{init_metrics, metrics_app};
use tarkib::router::init_router;
use tarkib::state::init_app_state;
use tarkib_config::ServerConfig;
use tarkib_db::run_migrations;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing().context("failed to initialize logging")?;
    let metrics_handle = init_metrics().context("failed to install metrics recorder")?;

    let state = init_app_state().await?;
    run_migrations(&state.db)
        .await
        .context("failed to run migrations")?;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", server_config.bind_addr()))?;

    tracing::info!(
        address = %server_config.bind_addr(),
        swagger = %format!("{}/swagger-ui", server_config.public_base_url),
        scalar = %format!("{}/scalar", server_config.public_base_url),
        "server started"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
