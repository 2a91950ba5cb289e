//! Resolved server configuration

use serde::{Deserialize, Serialize};
use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use types::utils::sanitize_for_logging;
use types::{EmailAdapterConfig, FilesAdapterConfig, PushConfig};

/// Where the database URI came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseUriSource {
    /// `DATABASE_URI`
    Explicit,
    /// `MONGOLAB_URI`
    LegacyAlias,
    /// A linked `mongo` container
    LinkedContainer,
    /// Hard-coded localhost fallback
    Default,
}

/// Configuration handed to the Parse Server at startup.
///
/// Built once by [`crate::ConfigLoader::assemble`] and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(rename = "databaseURI")]
    pub database_uri: String,
    pub database_uri_source: DatabaseUriSource,
    /// Cloud code entry point
    pub cloud: String,

    pub app_id: String,
    /// Not required here; the server decides what to do without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_key: Option<String>,
    #[serde(rename = "serverURL")]
    pub server_url: String,
    #[serde(rename = "publicServerURL", skip_serializing_if = "Option::is_none")]
    pub public_server_url: Option<String>,
    pub mount_path: String,
    pub host: String,
    pub port: u16,
    pub trust_proxy: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(rename = "restAPIKey", skip_serializing_if = "Option::is_none")]
    pub rest_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_net_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,

    /// Raw comma split, entries are not validated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_app_ids: Option<Vec<String>>,
    /// Passed through as given, e.g. `20mb`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_upload_size: Option<String>,
    pub allow_client_class_creation: bool,
    pub enable_anonymous_users: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    pub files_adapter: FilesAdapterConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<PushConfig>,
    pub verify_user_emails: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_adapter: Option<EmailAdapterConfig>,
}

pub const DEFAULT_DATABASE_URI: &str = "mongodb://localhost:27017/dev";
pub const DEFAULT_APP_ID: &str = "myAppId";
pub const DEFAULT_MOUNT_PATH: &str = "/parse";
pub const DEFAULT_PORT: u16 = 1337;

pub(crate) fn default_cloud() -> String {
    "cloud/main.js".to_string()
}

pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// `http://localhost:<port><mount>`
pub(crate) fn default_server_url(port: u16, mount_path: &str) -> String {
    format!("http://localhost:{}{}", port, mount_path)
}

impl ServerConfig {
    /// Address the HTTP listener binds to, with IPv6 literals bracketed
    pub fn listen_addr(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }

    /// Resolve `host` and `port` to socket addresses. IP literals never hit
    /// the resolver.
    pub fn socket_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map(Iterator::collect)
    }

    /// URL clients should use: `publicServerURL` when set, else `serverURL`
    pub fn effective_public_url(&self) -> &str {
        self.public_server_url
            .as_deref()
            .unwrap_or(&self.server_url)
    }

    pub fn push_enabled(&self) -> bool {
        self.push.is_some()
    }

    /// Copy with every key and secret masked, for dumps and logs
    pub fn redacted(&self) -> ServerConfig {
        let mask = |v: &Option<String>| v.as_deref().map(sanitize_for_logging);

        let mut copy = self.clone();
        copy.master_key = mask(&self.master_key);
        copy.client_key = mask(&self.client_key);
        copy.rest_api_key = mask(&self.rest_api_key);
        copy.dot_net_key = mask(&self.dot_net_key);
        copy.javascript_key = mask(&self.javascript_key);
        copy.file_key = mask(&self.file_key);

        if let FilesAdapterConfig::S3 {
            access_key,
            secret_key,
            ..
        } = &mut copy.files_adapter
        {
            *access_key = sanitize_for_logging(access_key);
            *secret_key = sanitize_for_logging(secret_key);
        }

        if let Some(android) = copy.push.as_mut().and_then(|p| p.android.as_mut()) {
            android.api_key = sanitize_for_logging(&android.api_key);
        }

        if let Some(adapter) = copy.email_adapter.as_mut() {
            adapter.options.api_key = mask(&adapter.options.api_key);
        }

        copy
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_uri: DEFAULT_DATABASE_URI.to_string(),
            database_uri_source: DatabaseUriSource::Default,
            cloud: default_cloud(),
            app_id: DEFAULT_APP_ID.to_string(),
            master_key: None,
            server_url: default_server_url(DEFAULT_PORT, DEFAULT_MOUNT_PATH),
            public_server_url: None,
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
            host: default_host(),
            port: DEFAULT_PORT,
            trust_proxy: true,
            collection_prefix: None,
            client_key: None,
            rest_api_key: None,
            dot_net_key: None,
            javascript_key: None,
            file_key: None,
            facebook_app_ids: None,
            max_upload_size: None,
            allow_client_class_creation: false,
            enable_anonymous_users: false,
            app_name: None,
            files_adapter: FilesAdapterConfig::Default,
            push: None,
            verify_user_emails: false,
            email_adapter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{AndroidPushConfig, EmailOptions};

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server_url, "http://localhost:1337/parse");
        assert_eq!(config.listen_addr(), "0.0.0.0:1337");
        assert_eq!(config.effective_public_url(), "http://localhost:1337/parse");
        assert!(!config.push_enabled());
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let config = ServerConfig {
            master_key: Some("supersecretmasterkey".to_string()),
            files_adapter: FilesAdapterConfig::S3 {
                access_key: "AKIAEXAMPLEKEY".to_string(),
                secret_key: "wJalrXUtnFEMI/K7MDENG".to_string(),
                bucket: "files".to_string(),
                direct_access: false,
            },
            push: Some(PushConfig {
                android: Some(AndroidPushConfig {
                    sender_id: "123".to_string(),
                    api_key: "AIzaSyExampleKey".to_string(),
                }),
                ios: vec![],
            }),
            email_adapter: Some(EmailAdapterConfig {
                module: "mailgun".to_string(),
                options: EmailOptions {
                    api_key: Some("key-abcdefghijk".to_string()),
                    ..Default::default()
                },
            }),
            ..Default::default()
        };

        let redacted = config.redacted();
        assert_eq!(redacted.master_key.as_deref(), Some("supe..."));
        assert_eq!(redacted.files_adapter.bucket(), Some("files"));
        match &redacted.files_adapter {
            FilesAdapterConfig::S3 { secret_key, .. } => assert_eq!(secret_key, "wJal..."),
            other => panic!("unexpected adapter: {other:?}"),
        }
        let android = redacted.push.unwrap().android.unwrap();
        assert_eq!(android.sender_id, "123");
        assert_eq!(android.api_key, "AIza...");
        assert_eq!(
            redacted.email_adapter.unwrap().options.api_key.as_deref(),
            Some("key-...")
        );
        // original untouched
        assert_eq!(config.master_key.as_deref(), Some("supersecretmasterkey"));
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(ServerConfig::default()).unwrap();
        assert_eq!(value["databaseURI"], DEFAULT_DATABASE_URI);
        assert_eq!(value["serverURL"], "http://localhost:1337/parse");
        assert_eq!(value["appId"], "myAppId");
        assert_eq!(value["filesAdapter"]["adapter"], "default");
        assert!(value.get("push").is_none());
        assert!(value.get("masterKey").is_none());
    }
}
