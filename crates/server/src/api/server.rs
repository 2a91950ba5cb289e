//! HTTP API server implementation

use crate::api::routes;
use crate::app::AppState;
use anyhow::{bail, Context, Result};
use axum::Router;
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP API server
pub struct ApiServer {
    app: Router,
    addrs: Vec<SocketAddr>,
    server_url: String,
    mount_path: String,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(state: Arc<AppState>) -> Result<Self> {
        let config = &state.config;

        // Resolve server address
        let addrs = config
            .socket_addrs()
            .with_context(|| format!("Invalid server host/port {}", config.listen_addr()))?;
        if addrs.is_empty() {
            bail!("Host {} resolved to no addresses", config.host);
        }

        let server_url = config.server_url.clone();
        let mount_path = config.mount_path.clone();

        let app = routes::create_router(state)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT));

        info!("API server configured for {:?}", addrs);

        Ok(Self {
            app,
            addrs,
            server_url,
            mount_path,
        })
    }

    /// Serve until `shutdown` completes, then drain in-flight requests
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addrs.as_slice())
            .await
            .context("Failed to bind to server address")?;
        let local_addr = listener.local_addr()?;

        info!(
            "docker-parse-server running on {} (:{}{})",
            self.server_url,
            local_addr.port(),
            self.mount_path
        );

        axum::serve(
            listener,
            self.app
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .context("API server error")?;

        info!("API server stopped");
        Ok(())
    }
}
