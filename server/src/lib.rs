//! Todo resource service.
//!
//! A collection endpoint (`/todos`) and an item endpoint (`/todos/{id}`) over
//! a SQLite-backed [`store::TodoStore`]. The store handle is created by the
//! caller and injected through [`state::AppState`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod payload;
pub mod router;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use model::{Todo, TodoFields};
pub use router::build_router;
pub use state::AppState;

use std::future::Future;

use tokio::net::TcpListener;

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, build_router(state)).await
}

/// Like [`run`], but returns once `shutdown` resolves and in-flight requests
/// have finished.
pub async fn run_until<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
