//! API route definitions

use crate::api::{handlers, middleware};
use crate::app::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Routes exposed under the configured mount path
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::api_health))
        .route("/serverInfo", get(handlers::server_info))
}

/// Create the main router: `/` plus the API at its mount path
pub fn create_router(state: Arc<AppState>) -> Router {
    let mount_path = state.config.mount_path.clone();

    let router = Router::new().route("/", get(handlers::root));
    let router = if mount_path == "/" {
        router.merge(api_routes())
    } else {
        router.nest(&mount_path, api_routes())
    };

    router
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::client_address,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use config::ServerConfig;
    use serde_json::Value;
    use tower::util::ServiceExt;
    use types::FilesAdapterConfig;

    fn create_test_app(config: ServerConfig) -> Router {
        create_router(Arc::new(AppState::new(config)))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let app = create_test_app(ServerConfig::default());
        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "I dream of being a web site.");
    }

    #[tokio::test]
    async fn test_health_under_mount_path() {
        let app = create_test_app(ServerConfig::default());
        let response = app.clone().oneshot(get_request("/parse/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_custom_mount_path() {
        let app = create_test_app(ServerConfig {
            mount_path: "/api/v1".to_string(),
            ..Default::default()
        });
        let response = app.oneshot(get_request("/api/v1/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_mount_path() {
        let app = create_test_app(ServerConfig {
            mount_path: "/".to_string(),
            ..Default::default()
        });
        let response = app.clone().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_server_info_requires_master_key() {
        let app = create_test_app(ServerConfig {
            master_key: Some("master".to_string()),
            ..Default::default()
        });

        let response = app.clone().oneshot(get_request("/parse/serverInfo")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let request = Request::builder()
            .uri("/parse/serverInfo")
            .header("X-Parse-Master-Key", "wrong")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_server_info_without_configured_master_key() {
        let app = create_test_app(ServerConfig::default());
        let request = Request::builder()
            .uri("/parse/serverInfo")
            .header("X-Parse-Master-Key", "")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_server_info_reports_features() {
        let app = create_test_app(ServerConfig {
            master_key: Some("master".to_string()),
            files_adapter: FilesAdapterConfig::S3 {
                access_key: "a".to_string(),
                secret_key: "b".to_string(),
                bucket: "c".to_string(),
                direct_access: true,
            },
            enable_anonymous_users: true,
            ..Default::default()
        });

        let request = Request::builder()
            .uri("/parse/serverInfo")
            .header("X-Parse-Master-Key", "master")
            .header("X-Forwarded-For", "198.51.100.4, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["appId"], "myAppId");
        assert_eq!(body["publicServerURL"], "http://localhost:1337/parse");
        assert_eq!(body["clientAddress"], "198.51.100.4");
        assert_eq!(body["features"]["push"]["enabled"], false);
        assert_eq!(body["features"]["files"]["adapter"], "s3");
        assert_eq!(body["features"]["files"]["directAccess"], true);
        assert_eq!(body["features"]["email"]["module"], Value::Null);
        assert_eq!(body["features"]["users"]["anonymous"], true);
    }
}
