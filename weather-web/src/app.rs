//! Router, shared state and the server loop.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{Router, routing::get};
use tokio::{net::TcpListener, signal};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use weather_core::{AppConfig, Providers, provider::providers_from_config};

use crate::{handler, render::Renderer};

/// Assets in the source checkout, used when no static dir is configured.
/// Only valid on the build machine; deployments set `server.static_dir`.
const BUNDLED_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Per-request handlers get a clone; nothing in here is mutated after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub providers: Providers,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, providers: Providers, renderer: Renderer) -> Self {
        Self {
            config,
            providers,
            renderer,
        }
    }

    /// Build the providers and the renderer described by `config`.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let providers = providers_from_config(&config)?;
        let renderer = Renderer::from_dir(config.server.templates_dir.as_deref())
            .context("Failed to load templates")?;

        Ok(Self::new(Arc::new(config), providers, renderer))
    }

    fn static_dir(&self) -> PathBuf {
        self.config
            .server
            .static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(BUNDLED_STATIC_DIR))
    }
}

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(state.static_dir());

    Router::new()
        .route("/", get(handler::index))
        .nest_service("/static", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl+C / SIGTERM.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let environment = config.environment.clone();
    let state = AppState::from_config(config)?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, %environment, "Listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
