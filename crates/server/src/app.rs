//! Main application structure and lifecycle management

use crate::api::ApiServer;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use config::ServerConfig;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Shared, read-only application state
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            started_at: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// Owns the HTTP server for the lifetime of the process
pub struct Application {
    state: Arc<AppState>,
    api_server: ApiServer,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: ServerConfig) -> Result<Self> {
        let state = Arc::new(AppState::new(config));

        let api_server = ApiServer::new(state.clone()).context("Failed to create API server")?;

        Ok(Self { state, api_server })
    }

    /// Run the application until `shutdown` completes
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            "Serving Parse API under {} on {}",
            self.state.config.mount_path,
            self.state.config.listen_addr()
        );

        self.api_server.run(shutdown).await.context("API server error")
    }
}
