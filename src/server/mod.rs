use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tokio::net::TcpListener;
use tracing::{info, warn};

mod config;
mod error;
mod handlers;
mod state;

use handlers::build_router;
use state::AppState;

pub use config::*;

use crate::catalog::Catalog;

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /**
        Loads the product catalog once, then serves search
        requests until a shutdown signal is received.
    */
    pub async fn serve(self) -> Result<()> {
        let mut rng = match self.config.catalog_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let catalog = Catalog::load(&self.config.catalog_file, &mut rng).await;

        if self.config.vision_api_key.is_none() {
            warn!("No vision api key configured, searches will use fallback colors");
        }

        let addr = self.config.socket_addr();
        let app = build_router(AppState::new(self.config, catalog));

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind to {addr}"))?;
        info!("Server running on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown_signal())
            .await
            .context("server failed")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
