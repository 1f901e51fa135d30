use anyhow::Context;
use tokio::net::TcpListener;

use todo_server::config::Config;
use todo_server::store::TodoStore;
use todo_server::{telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(config.log_format)?;

    let store = TodoStore::open(&config.db_path)
        .with_context(|| format!("opening todo store at {}", config.db_path))?;
    let state = AppState::new(store);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, db_path = %config.db_path, "todo server listening");

    todo_server::run_until(listener, state.clone(), shutdown_signal()).await?;

    match state.into_store() {
        Some(store) => {
            store.close().context("closing todo store")?;
            tracing::info!("todo store closed");
        }
        None => tracing::warn!("todo store still in use at shutdown, dropping it"),
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
