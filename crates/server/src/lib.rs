//! Simulated HTTP boundary in front of the in-memory record store.
//!
//! Runs standalone through the `server` binary, or embedded inside a client
//! process on an ephemeral loopback port via [`spawn_embedded`].

use std::{net::SocketAddr, sync::Arc};

use server_api::ApiContext;
use storage::Storage;
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{error, info};

mod api;
mod app_state;
pub mod config;

pub use api::build_router;
pub use app_state::AppState;
use config::Settings;

pub fn api_context_from_settings(settings: &Settings) -> ApiContext {
    let storage = if settings.seed_data {
        Storage::seeded()
    } else {
        Storage::new()
    };
    ApiContext::new(storage).with_latency(settings.response_delay())
}

/// A server running on a background task. Aborted when dropped.
pub struct EmbeddedServer {
    local_addr: SocketAddr,
    task: JoinHandle<()>,
}

impl EmbeddedServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }
}

impl Drop for EmbeddedServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub async fn serve_on(listener: TcpListener, api: ApiContext) -> anyhow::Result<EmbeddedServer> {
    let local_addr = listener.local_addr()?;
    let app = build_router(Arc::new(AppState::new(api)));
    let task = tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, app).await {
            error!(%error, "embedded server stopped");
        }
    });
    info!(%local_addr, "embedded server listening");
    Ok(EmbeddedServer { local_addr, task })
}

pub async fn spawn_embedded(api: ApiContext) -> anyhow::Result<EmbeddedServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    serve_on(listener, api).await
}
