//! HTTP API request handlers

use crate::api::middleware::ClientAddress;
use crate::app::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Header carrying the master key on privileged requests
pub const MASTER_KEY_HEADER: &str = "x-parse-master-key";

/// Static page served at `/`
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "I dream of being a web site.")
}

/// Liveness of the API mount
pub async fn api_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Feature summary of the resolved configuration. Requires the master key.
pub async fn server_info(
    State(state): State<Arc<AppState>>,
    client: Option<Extension<ClientAddress>>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let config = &state.config;
    let client = client.and_then(|Extension(ClientAddress(address))| address);

    let provided = headers
        .get(MASTER_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    match (config.master_key.as_deref(), provided) {
        (Some(expected), Some(given)) if expected == given => {
            info!(client = ?client, "serverInfo requested");
        }
        _ => {
            warn!(client = ?client, "serverInfo rejected, master key missing or wrong");
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "unauthorized: master key is required" })),
            ));
        }
    }

    let push = config.push.as_ref();

    Ok(Json(json!({
        "appId": config.app_id,
        "appName": config.app_name,
        "serverURL": config.server_url,
        "publicServerURL": config.effective_public_url(),
        "mountPath": config.mount_path,
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSeconds": state.uptime_seconds(),
        "clientAddress": client,
        "features": {
            "push": {
                "enabled": push.is_some(),
                "android": push.is_some_and(|p| p.android.is_some()),
                "iosProduction": push.is_some_and(|p| p.has_production_ios()),
                "iosDevelopment": push.is_some_and(|p| p.has_development_ios()),
            },
            "files": {
                "adapter": config.files_adapter.provider(),
                "directAccess": config.files_adapter.direct_access(),
            },
            "email": {
                "module": config.email_adapter.as_ref().map(|a| a.module.as_str()),
                "verifyUserEmails": config.verify_user_emails,
            },
            "users": {
                "anonymous": config.enable_anonymous_users,
            },
            "schemas": {
                "clientClassCreation": config.allow_client_class_creation,
            },
        },
    })))
}
