//! HTTP middleware implementations

use crate::app::AppState;
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, sync::Arc};

/// Client address recorded for each request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub Option<String>);

/// Record the client address in the request extensions.
///
/// With `TRUST_PROXY` enabled the first `X-Forwarded-For` entry wins,
/// otherwise the socket peer address is used.
pub async fn client_address(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let forwarded = if state.config.trust_proxy {
        request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    } else {
        None
    };

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let address = forwarded.or(peer);
    tracing::debug!(client = ?address, path = %request.uri().path(), "Incoming request");

    request.extensions_mut().insert(ClientAddress(address));
    next.run(request).await
}
